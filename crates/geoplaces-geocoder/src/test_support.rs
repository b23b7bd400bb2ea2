//! In-memory places service for unit tests.

use std::future::Future;
use std::sync::Mutex;

use geoplaces_client::{
    GetPlaceRequest, GetPlaceResponse, PlacesError, PlacesService, ReverseGeocodeRequest,
    ReverseGeocodeResponse, SearchTextRequest, SearchTextResponse, SuggestRequest,
    SuggestResponse,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::Notify;

/// Answers every list operation with the same `Results` array and records
/// each request it receives as JSON.
#[derive(Default)]
pub(crate) struct FakePlaces {
    results: Value,
    place: Value,
    fail: bool,
    gated: bool,
    /// Notified when a gated call has recorded its request.
    pub(crate) started: Notify,
    /// Lets a gated call return.
    pub(crate) release: Notify,
    requests: Mutex<Vec<(&'static str, Value)>>,
}

impl FakePlaces {
    pub(crate) fn returning(results: Value) -> Self {
        Self {
            results,
            place: json!({}),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_place(mut self, place: Value) -> Self {
        self.place = place;
        self
    }

    /// Calls wait for [`release`](Self::release) before answering.
    pub(crate) fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    pub(crate) fn requests(&self, operation: &str) -> Vec<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(op, _)| *op == operation)
            .map(|(_, body)| body.clone())
            .collect()
    }

    fn record(&self, operation: &'static str, request: &impl Serialize) {
        let body = serde_json::to_value(request).unwrap();
        self.requests.lock().unwrap().push((operation, body));
    }

    async fn respond<T: DeserializeOwned>(&self, body: Value) -> Result<T, PlacesError> {
        if self.gated {
            self.started.notify_one();
            self.release.notified().await;
        }
        if self.fail {
            return Err(PlacesError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(serde_json::from_value(body).unwrap())
    }
}

impl PlacesService for FakePlaces {
    fn search_text(
        &self,
        request: &SearchTextRequest,
    ) -> impl Future<Output = Result<SearchTextResponse, PlacesError>> + Send {
        self.record("SearchText", request);
        self.respond(json!({ "Results": self.results.clone() }))
    }

    fn reverse_geocode(
        &self,
        request: &ReverseGeocodeRequest,
    ) -> impl Future<Output = Result<ReverseGeocodeResponse, PlacesError>> + Send {
        self.record("ReverseGeocode", request);
        self.respond(json!({ "Results": self.results.clone() }))
    }

    fn get_place(
        &self,
        request: &GetPlaceRequest,
    ) -> impl Future<Output = Result<GetPlaceResponse, PlacesError>> + Send {
        self.record("GetPlace", request);
        self.respond(self.place.clone())
    }

    fn suggest(
        &self,
        request: &SuggestRequest,
    ) -> impl Future<Output = Result<SuggestResponse, PlacesError>> + Send {
        self.record("Suggest", request);
        self.respond(json!({ "Results": self.results.clone() }))
    }
}
