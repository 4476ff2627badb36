// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod locks;
mod operations;
mod request_response;
mod validation;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use locks::DateLocks;
pub use operations::{
    Services, dj_range, evaluate_availability, fully_booked_report, nearby, reconcile_sources,
    scan_dates, submit, summarize_date,
};
pub use request_response::{
    DiscrepancyInfo, DjBookedDateInfo, DjRangeRequest, DjRangeResponse,
    EvaluateAvailabilityRequest, EvaluateAvailabilityResponse, FullyBookedDateInfo,
    FullyBookedResponse, NearbyBookingsRequest, NearbyBookingsResponse, NearbyDayInfo,
    ReconcileRequest, ReconcileResponse, ScanRangeRequest, ScanRangeResponse, ScannedDateInfo,
    SubmitBookingRequest, SubmitBookingResponse, SummarizeDateRequest, SummarizeDateResponse,
};
pub use validation::RequestValidationError;
