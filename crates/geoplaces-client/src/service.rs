//! The seam between the geocoder and whatever actually talks to the places
//! service.

use std::future::Future;

use crate::error::PlacesError;
use crate::types::{
    GetPlaceRequest, GetPlaceResponse, ReverseGeocodeRequest, ReverseGeocodeResponse,
    SearchTextRequest, SearchTextResponse, SuggestRequest, SuggestResponse,
};

/// One logical request and one logical response per operation.
///
/// [`PlacesClient`](crate::PlacesClient) implements this over HTTP;
/// tests substitute in-memory fakes.
pub trait PlacesService: Send + Sync {
    fn search_text(
        &self,
        request: &SearchTextRequest,
    ) -> impl Future<Output = Result<SearchTextResponse, PlacesError>> + Send;

    fn reverse_geocode(
        &self,
        request: &ReverseGeocodeRequest,
    ) -> impl Future<Output = Result<ReverseGeocodeResponse, PlacesError>> + Send;

    fn get_place(
        &self,
        request: &GetPlaceRequest,
    ) -> impl Future<Output = Result<GetPlaceResponse, PlacesError>> + Send;

    fn suggest(
        &self,
        request: &SuggestRequest,
    ) -> impl Future<Output = Result<SuggestResponse, PlacesError>> + Send;
}
