//! Internal invariant checks.
//!
//! A fault means the compiled tables (or the engine itself) are inconsistent,
//! never that the caller passed a bad hostname. Faults are reported to a
//! [`FaultHandler`] chosen when the registry is built. The default handler
//! aborts the process; hosting applications can install one that logs and
//! lets the lookup fall back to a zero result.

use std::fmt;

/// A failed internal check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub file: &'static str,
    pub line: u32,
    pub condition: &'static str,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}. CHECK failed: {}", self.file, self.line, self.condition)
    }
}

/// Receives failed internal checks.
///
/// Returning from [`FaultHandler::on_fault`] means the lookup continues and
/// reports no suffix.
pub trait FaultHandler: Send + Sync {
    fn on_fault(&self, fault: &Fault);
}

/// Default policy: report on stderr and abort.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbortOnFault;

impl FaultHandler for AbortOnFault {
    fn on_fault(&self, fault: &Fault) {
        log::error!("{}", fault);
        eprintln!("{}", fault);
        std::process::abort();
    }
}

/// Logs the fault and keeps going.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnFault;

impl FaultHandler for LogOnFault {
    fn on_fault(&self, fault: &Fault) {
        log::error!("{}", fault);
    }
}

impl<F> FaultHandler for F
where
    F: Fn(&Fault) + Send + Sync,
{
    fn on_fault(&self, fault: &Fault) {
        self(fault)
    }
}

/// Reports `$condition` to `$handler` unconditionally.
macro_rules! fault {
    ($handler:expr, $condition:expr) => {{
        #[allow(unused_imports)]
        use $crate::fault::FaultHandler as _;
        $handler.on_fault(&$crate::fault::Fault {
            file: file!(),
            line: line!(),
            condition: $condition,
        });
    }};
}

/// Evaluates `$cond`; when false, reports it to `$handler` and yields `false`.
macro_rules! check {
    ($handler:expr, $cond:expr) => {{
        let ok: bool = $cond;
        if !ok {
            $crate::fault::fault!($handler, stringify!($cond));
        }
        ok
    }};
}

pub(crate) use {check, fault};
