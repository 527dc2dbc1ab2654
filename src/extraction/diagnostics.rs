/// Log target shared by the extraction modules.
pub(crate) const LOG_TARGET: &str = "smitch";

/// Sink for non-fatal conditions met while extracting a sheet.
///
/// Nothing reported here aborts an extraction; the sink only lets the caller
/// surface why a sheet produced less data than expected.
pub trait Diagnostics {
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn warn(&self, message: &str) {
        (**self).warn(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// Forwards diagnostics to the `log` facade.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&self, message: &str) {
        log::warn!(target: LOG_TARGET, "{message}");
    }

    fn error(&self, message: &str) {
        log::error!(target: LOG_TARGET, "{message}");
    }
}

/// Discards every diagnostic.
#[derive(Copy, Clone, Debug, Default)]
pub struct SilentDiagnostics;

impl Diagnostics for SilentDiagnostics {
    fn warn(&self, _: &str) {}

    fn error(&self, _: &str) {}
}
