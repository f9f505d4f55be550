//! Toolkit-neutral description of an editable form and of the values a
//! form interaction hands back.
//!
//! A form is a tree: tabs and stacks (a combo box switching between
//! sub-forms) contain pages, pages contain flat lists of fields. Values
//! come back in the same shape, with headings and separators dropped.

use crate::error::FigureEditError;
use chrono::{DateTime, Utc};
use std::any::Any;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub key: String,
    pub label: String,
}

/// A selection among options, `initial` being the key selected first
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub initial: String,
    pub options: Vec<ChoiceOption>,
}

impl Choice {
    pub fn new(initial: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
        Self {
            initial: initial.into(),
            options,
        }
    }

    /// Options whose key doubles as the displayed label
    pub fn from_keys<I, S>(initial: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = keys
            .into_iter()
            .map(|key| {
                let key = key.into();
                ChoiceOption {
                    label: key.clone(),
                    key,
                }
            })
            .collect();
        Self::new(initial, options)
    }

    pub fn label_of(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.key == key)
            .map(|option| option.label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Float(f64),
    Bool(bool),
    Date(DateTime<Utc>),
    /// `#rrggbbaa` color string
    Color(String),
    /// Key of the selected option
    Choice(String),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Float(_) => "float",
            FieldValue::Bool(_) => "bool",
            FieldValue::Date(_) => "date",
            FieldValue::Color(_) => "color",
            FieldValue::Choice(_) => "choice",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormItem {
    Field { label: String, value: FieldValue },
    Choice { label: String, choice: Choice },
    /// Bold section title, carries no value
    Heading(String),
    Separator,
}

impl FormItem {
    pub fn field(label: &str, value: FieldValue) -> Self {
        FormItem::Field {
            label: label.to_string(),
            value,
        }
    }

    pub fn choice(label: &str, choice: Choice) -> Self {
        FormItem::Choice {
            label: label.to_string(),
            choice,
        }
    }

    /// Value of the item when the user leaves it untouched
    pub fn default_value(&self) -> Option<FieldValue> {
        match self {
            FormItem::Field { value, .. } => Some(value.clone()),
            FormItem::Choice { choice, .. } => Some(FieldValue::Choice(choice.initial.clone())),
            FormItem::Heading(_) | FormItem::Separator => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPage {
    pub title: String,
    pub comment: String,
    pub node: FormNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormNode {
    Form(Vec<FormItem>),
    /// Pages selected one at a time through a combo box
    Stack(Vec<FormPage>),
    Tabs(Vec<FormPage>),
}

impl FormNode {
    /// The values a confirmed, unmodified form returns
    pub fn default_values(&self) -> Vec<FormValue> {
        match self {
            FormNode::Form(items) => items
                .iter()
                .filter_map(FormItem::default_value)
                .map(FormValue::Field)
                .collect(),
            FormNode::Stack(pages) | FormNode::Tabs(pages) => pages
                .iter()
                .map(|page| FormValue::Group(page.node.default_values()))
                .collect(),
        }
    }

    pub fn pages(&self) -> &[FormPage] {
        match self {
            FormNode::Form(_) => &[],
            FormNode::Stack(pages) | FormNode::Tabs(pages) => pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Field(FieldValue),
    Group(Vec<FormValue>),
}

impl FormValue {
    pub fn as_group_mut(&mut self) -> Option<&mut Vec<FormValue>> {
        match self {
            FormValue::Group(values) => Some(values),
            FormValue::Field(_) => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            FormValue::Field(value) => value.kind().to_string(),
            FormValue::Group(values) => format!("group of {}", values.len()),
        }
    }
}

/// Everything a toolkit needs to show the editor dialog
pub struct FormRequest<'a> {
    pub form: &'a FormNode,
    pub title: &'a str,
    pub icon: Option<&'a Path>,
    /// Opaque parent window handle, passed through untouched
    pub parent: Option<&'a dyn Any>,
}

/// Live-preview hook handed to the dialog
pub type ApplyCallback<'a> = dyn FnMut(Vec<FormValue>) -> Result<(), FigureEditError> + 'a;

/// The form-rendering toolkit.
///
/// `edit` blocks until the user confirms or cancels. It may call `apply`
/// synchronously with intermediate values (an "Apply" button). On confirm
/// it returns the final values, which the editor commits; on cancel it
/// returns `None`.
pub trait FormDialog {
    fn edit(
        &mut self,
        request: &FormRequest<'_>,
        apply: &mut ApplyCallback<'_>,
    ) -> Option<Vec<FormValue>>;
}
