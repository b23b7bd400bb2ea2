pub mod client;
pub mod error;
mod retry;
pub mod service;
pub mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use service::PlacesService;
pub use types::{
    Address, GetPlaceRequest, GetPlaceResponse, PlaceItem, ReverseGeocodeRequest,
    ReverseGeocodeResponse, SearchTextRequest, SearchTextResponse, SuggestItem, SuggestPlace,
    SuggestRequest, SuggestResponse,
};
