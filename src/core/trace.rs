//! Optional span instrumentation around keeper operations

use std::error::Error;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Int(i64),
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "{s}"),
            AttributeValue::Int(i) => write!(f, "{i}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub key: &'static str,
    pub value: AttributeValue,
}

impl Attribute {
    pub fn string(key: &'static str, value: &str) -> Self {
        Self {
            key,
            value: AttributeValue::String(value.to_string()),
        }
    }

    pub fn int(key: &'static str, value: i64) -> Self {
        Self {
            key,
            value: AttributeValue::Int(value),
        }
    }
}

/// A span opened by an [`Instrumentation`]. Ending it consumes it.
pub trait ActiveSpan {
    fn end(self: Box<Self>, error: Option<&(dyn Error + 'static)>);
}

/// Receives span events. Implementations must not affect the outcome of the
/// instrumented operation.
pub trait Instrumentation: Send + Sync {
    fn start_span(&self, _name: &'static str, _attributes: &[Attribute]) -> Box<dyn ActiveSpan> {
        Box::new(NoopSpan)
    }
}

pub struct NoopSpan;

impl ActiveSpan for NoopSpan {
    fn end(self: Box<Self>, _error: Option<&(dyn Error + 'static)>) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInstrumentation;

impl Instrumentation for NoopInstrumentation {}

/// Reports spans through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInstrumentation;

struct TracingSpan {
    name: &'static str,
    span: tracing::span::EnteredSpan,
}

struct Attributes<'a>(&'a [Attribute]);

impl Display for Attributes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attr) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={}", attr.key, attr.value)?;
        }
        Ok(())
    }
}

impl Instrumentation for TracingInstrumentation {
    fn start_span(&self, name: &'static str, attributes: &[Attribute]) -> Box<dyn ActiveSpan> {
        let span = tracing::debug_span!("coin_info", op = name, attrs = %Attributes(attributes));
        Box::new(TracingSpan {
            name,
            span: span.entered(),
        })
    }
}

impl ActiveSpan for TracingSpan {
    fn end(self: Box<Self>, error: Option<&(dyn Error + 'static)>) {
        let TracingSpan { name, span } = *self;
        match error {
            Some(e) => tracing::error!(op = name, error = %e, "Span ended with error"),
            None => tracing::debug!(op = name, "Span ended"),
        }
        drop(span);
    }
}
