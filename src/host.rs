//! Host capability interfaces
//!
//! The host owns the parameter store and the error-reporting channel. The
//! plugin only ever holds a reference to these capabilities; it never
//! subclasses or owns host objects.
//!
//! [`SimulatedHost`] is an in-process host used by the harness binary and
//! the test suites.

use std::collections::{HashMap, HashSet};

use parking_lot::{Mutex, RwLock};

use crate::error::FxMaskError;
use crate::params::{Parameter, ParameterId, ParameterValue};

/// Read/write access to the host's parameter store
pub trait ParameterAccess: Send + Sync {
    /// Current value of a parameter, or `None` if the host has no such parameter
    fn get_parameter(&self, id: ParameterId) -> Option<ParameterValue>;

    /// Write a parameter value
    fn set_parameter(&self, id: ParameterId, value: ParameterValue) -> Result<(), FxMaskError>;
}

/// The host's standard error-reporting capability
pub trait ErrorReporter: Send + Sync {
    fn report_error(&self, error: &FxMaskError);
}

/// Everything the plugin needs from its host
pub trait HostApi: ParameterAccess + ErrorReporter {}

impl<T: ParameterAccess + ErrorReporter + ?Sized> HostApi for T {}

/// In-process host with a typed parameter store
///
/// Parameters are added with [`SimulatedHost::add_parameter`]; writes are
/// type-checked and range-clamped against the registered metadata, and
/// refused for locked parameters. Reported errors are recorded for
/// inspection.
#[derive(Default)]
pub struct SimulatedHost {
    parameters: RwLock<HashMap<ParameterId, Parameter>>,
    locked: RwLock<HashSet<ParameterId>>,
    errors: Mutex<Vec<FxMaskError>>,
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host with every given parameter registered at its default
    pub fn with_parameters(parameters: impl IntoIterator<Item = Parameter>) -> Self {
        let host = Self::new();
        for param in parameters {
            host.add_parameter(param);
        }
        host
    }

    /// Register a parameter (replaces an existing one with the same id)
    pub fn add_parameter(&self, parameter: Parameter) {
        self.parameters.write().insert(parameter.id(), parameter);
    }

    /// Remove a parameter, simulating a host that lost it
    pub fn remove_parameter(&self, id: ParameterId) -> Option<Parameter> {
        self.parameters.write().remove(&id)
    }

    /// Lock or unlock a parameter, simulating a user-locked inspector row
    pub fn set_locked(&self, id: ParameterId, locked: bool) {
        let mut set = self.locked.write();
        if locked {
            set.insert(id);
        } else {
            set.remove(&id);
        }
    }

    /// Errors reported so far
    pub fn reported_errors(&self) -> Vec<FxMaskError> {
        self.errors.lock().clone()
    }

    /// Drain recorded errors
    pub fn take_errors(&self) -> Vec<FxMaskError> {
        std::mem::take(&mut *self.errors.lock())
    }
}

impl ParameterAccess for SimulatedHost {
    fn get_parameter(&self, id: ParameterId) -> Option<ParameterValue> {
        self.parameters.read().get(&id).map(|p| p.value)
    }

    fn set_parameter(&self, id: ParameterId, value: ParameterValue) -> Result<(), FxMaskError> {
        if self.locked.read().contains(&id) {
            return Err(FxMaskError::HostRejected {
                id,
                reason: "parameter is locked".to_string(),
            });
        }
        let mut parameters = self.parameters.write();
        let param = parameters
            .get_mut(&id)
            .ok_or(FxMaskError::MissingParameter(id))?;
        param.set_value(value)
    }
}

impl ErrorReporter for SimulatedHost {
    fn report_error(&self, error: &FxMaskError) {
        self.errors.lock().push(error.clone());
    }
}
