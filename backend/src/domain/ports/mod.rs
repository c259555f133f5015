//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_provider;
mod menu_catalogue_repository;
mod menu_source;
mod staff_access;

#[cfg(test)]
pub use auth_provider::MockAuthProvider;
pub use auth_provider::{
    AuthProvider, AuthProviderError, AuthSession, AuthUser, FixtureAuthProvider, ProfileMetadata,
    SignUpOutcome, SignUpRequest,
};
#[cfg(test)]
pub use menu_catalogue_repository::MockMenuCatalogueRepository;
pub use menu_catalogue_repository::{
    BranchRecord, FixtureMenuCatalogueRepository, MenuCatalogueRepository,
    MenuCatalogueRepositoryError, StockRecord, WineRecord,
};
#[cfg(test)]
pub use menu_source::MockMenuSource;
pub use menu_source::{FixtureMenuSource, MenuSource, MenuSourceError};
#[cfg(test)]
pub use staff_access::MockStaffAccessRequester;
pub use staff_access::{
    AccessRequestReply, FixtureStaffAccessRequester, StaffAccessError, StaffAccessRequest,
    StaffAccessRequester,
};

#[cfg(test)]
mod tests;
