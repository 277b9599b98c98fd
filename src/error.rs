//! Error types
//!
//! Configuration faults are the only errors the core produces. They are
//! reported to the host and never abort a frame; degenerate geometry is
//! clamped locally and never becomes an error.

use crate::params::ParameterId;

/// Faults caused by the host supplying unusable state
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FxMaskError {
    /// The screen-to-render transform has no inverse
    #[error("view transform is not invertible")]
    NonInvertibleTransform,

    /// The host has no value for a parameter the plugin registered
    #[error("parameter {0:?} is not available from the host")]
    MissingParameter(ParameterId),

    /// The host returned a value of the wrong kind
    #[error("parameter {id:?} has the wrong type (expected {expected})")]
    ParameterType {
        id: ParameterId,
        expected: &'static str,
    },

    /// The host refused a parameter write
    #[error("host rejected write to parameter {id:?}: {reason}")]
    HostRejected { id: ParameterId, reason: String },
}

/// Settings-related errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::DeError),
    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::SeError),
    #[error("Could not find config directory")]
    NoConfigDir,
}
