use oxrdf::Quad;
use tracing::warn;

use crate::Error;

/// The error a listener may return. It is logged and otherwise ignored.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Receives quads as they are emitted, and errors as they are reported.
pub trait QuadSink {
    fn on_quad(&mut self, quad: &Quad) -> Result<(), ListenerError>;

    fn on_error(&mut self, _error: &Error) -> Result<(), ListenerError> {
        Ok(())
    }

    /// Called once, after the last quad of the document.
    fn on_finish(&mut self) -> Result<(), ListenerError> {
        Ok(())
    }
}

impl QuadSink for Vec<Quad> {
    fn on_quad(&mut self, quad: &Quad) -> Result<(), ListenerError> {
        self.push(quad.clone());
        Ok(())
    }
}

/// Adapts a closure into a sink for quads.
pub struct DataListener<F>(pub F);

impl<F: FnMut(&Quad) -> Result<(), ListenerError>> QuadSink for DataListener<F> {
    fn on_quad(&mut self, quad: &Quad) -> Result<(), ListenerError> {
        (self.0)(quad)
    }
}

/// Adapts a closure into a sink for errors.
pub struct ErrorListener<F>(pub F);

impl<F: FnMut(&Error) -> Result<(), ListenerError>> QuadSink for ErrorListener<F> {
    fn on_quad(&mut self, _quad: &Quad) -> Result<(), ListenerError> {
        Ok(())
    }

    fn on_error(&mut self, error: &Error) -> Result<(), ListenerError> {
        (self.0)(error)
    }
}

/// Fans events out to every subscriber, in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    sinks: Vec<Box<dyn QuadSink>>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, sink: impl QuadSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub(crate) fn quad(&mut self, quad: &Quad) {
        for (index, sink) in self.sinks.iter_mut().enumerate() {
            if let Err(error) = sink.on_quad(quad) {
                warn!(listener = index, %error, "Data listener failed");
            }
        }
    }

    pub(crate) fn error(&mut self, error: &Error) {
        for (index, sink) in self.sinks.iter_mut().enumerate() {
            if let Err(listener_error) = sink.on_error(error) {
                warn!(listener = index, %error, %listener_error, "Error listener failed");
            }
        }
    }

    pub(crate) fn finish(&mut self) {
        for (index, sink) in self.sinks.iter_mut().enumerate() {
            if let Err(error) = sink.on_finish() {
                warn!(listener = index, %error, "Finish listener failed");
            }
        }
    }
}
