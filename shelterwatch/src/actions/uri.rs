//! URI builders for shelter actions.

use url::Url;

use super::error::LaunchError;
use crate::geo::GeoFix;
use crate::shelter::Shelter;

/// Naver map route endpoint.
pub const ROUTE_BASE_URL: &str = "http://map.naver.com/index.nhn";

/// Label the route planner shows for the start point.
const ORIGIN_LABEL: &str = "현재위치";

/// `tel:` URI for a contact number.
pub fn call_uri(contact: &str) -> String {
    format!("tel:{}", contact.trim())
}

/// Route from `origin` to `shelter` on Naver map.
///
/// Without an origin the start parameters are left out and the map picks
/// its own start point.
pub fn route_uri(origin: Option<&GeoFix>, shelter: &Shelter) -> Result<Url, LaunchError> {
    let mut params: Vec<(&str, String)> = Vec::with_capacity(9);

    if let Some(origin) = origin {
        params.push(("slng", origin.longitude.to_string()));
        params.push(("slat", origin.latitude.to_string()));
        params.push(("stext", ORIGIN_LABEL.to_string()));
    }

    params.push(("elng", shelter.coordinates.longitude.to_string()));
    params.push(("elat", shelter.coordinates.latitude.to_string()));
    params.push(("etext", shelter.name.clone()));
    params.push(("menu", "route".to_string()));
    params.push(("pathType", "1".to_string()));

    Url::parse_with_params(ROUTE_BASE_URL, &params)
        .map_err(|e| LaunchError::InvalidUri(e.to_string()))
}

/// Platform maps URI pointing at the shelter.
pub fn fallback_route_uri(shelter: &Shelter) -> String {
    format!(
        "maps:{},{}",
        shelter.coordinates.latitude, shelter.coordinates.longitude
    )
}
