use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// Converts between data values and the floats an axis stores.
///
/// Converters are shared between axes and compared by identity, so they are
/// always handled through `Arc`.
pub trait UnitConverter: Debug + Send + Sync + 'static {
    fn name(&self) -> &str;

    /// Whether axis limits should be presented as calendar dates
    fn is_date(&self) -> bool {
        false
    }
}

/// Plain numeric axis values
#[derive(Debug, Clone, Default)]
pub struct NumberConverter;

impl UnitConverter for NumberConverter {
    fn name(&self) -> &str {
        "number"
    }
}

/// Axis values are day numbers since 1970-01-01, see `plotedit_common::dates`
#[derive(Debug, Clone, Default)]
pub struct DateConverter;

impl UnitConverter for DateConverter {
    fn name(&self) -> &str {
        "date"
    }

    fn is_date(&self) -> bool {
        true
    }
}

/// Opaque unit state attached to an axis
#[derive(Clone)]
pub struct Units(Arc<dyn Any + Send + Sync>);

impl Units {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether both handles refer to the same unit instance
    pub fn ptr_eq(&self, other: &Units) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Units({:p})", Arc::as_ptr(&self.0))
    }
}

/// Whether two optional converters are the same instance
pub fn same_converter(
    a: &Option<Arc<dyn UnitConverter>>,
    b: &Option<Arc<dyn UnitConverter>>,
) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
