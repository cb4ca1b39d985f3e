// SPDX-License-Identifier: Apache-2.0

//! Per-domain stores. Uniform contract: `load()` flips `loading`, clears
//! `error`, and on failure records the human-readable detail while leaving
//! previously loaded data untouched. Concurrent loads are not fenced; the
//! last response to resolve wins.

mod company;
mod dashboard;
mod filters;
mod identity;
mod insights;
mod operations;
mod opportunities;
mod toast;
mod zoning;

pub use company::CompanyStore;
pub use dashboard::DashboardStore;
pub use filters::{FiltersStore, GlobalFilters};
pub use identity::IdentityStore;
pub use insights::InsightsStore;
pub use operations::{OperationsStore, PendingCreate, PendingState};
pub use opportunities::OpportunitiesStore;
pub use toast::{Toast, ToastStore};
pub use zoning::ZoningStore;
