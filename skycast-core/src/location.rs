use thiserror::Error;

pub mod ipapi;
pub mod nominatim;

pub use ipapi::IpLocator;
pub use nominatim::ReverseGeocoder;

/// Outcome of the consent prompt shown once at launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

impl Permission {
    pub fn granted(self) -> bool {
        matches!(self, Permission::Granted)
    }
}

/// Location service errors.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("position service reported failure: {0}")]
    Service(String),

    #[error("no usable place name in geocoder response")]
    NoPlace,
}
