//! # Route Table
//!
//! The fixed set of named pet endpoints and the axum [`Router`] built from
//! it. Templates use `{name}` for their single placeholder segment.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{MethodFilter, MethodRouter};
use axum::Router;

use crate::store::PetStore;

use super::handler::{self, ApiState};

/// Versioned prefix shared by every route
pub const API_PREFIX: &str = "/v2";

/// Handler bound to a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    AddPet,
    DeletePet,
    GetPets,
    GetPetById,
    UpdatePet,
}

/// A named (method, path template) pair
#[derive(Debug, Clone)]
pub struct Route {
    pub name: &'static str,
    pub method: Method,
    pub pattern: &'static str,
    pub endpoint: Endpoint,
}

static ROUTES: [Route; 5] = [
    Route {
        name: "addPet",
        method: Method::POST,
        pattern: "/v2/pet/{petId}",
        endpoint: Endpoint::AddPet,
    },
    Route {
        name: "deletePet",
        method: Method::DELETE,
        pattern: "/v2/pet/{petId}",
        endpoint: Endpoint::DeletePet,
    },
    Route {
        name: "getPets",
        method: Method::GET,
        pattern: "/v2/pets",
        endpoint: Endpoint::GetPets,
    },
    Route {
        name: "getPetByID",
        method: Method::GET,
        pattern: "/v2/pet/{petId}",
        endpoint: Endpoint::GetPetById,
    },
    Route {
        name: "updatePet",
        method: Method::PUT,
        pattern: "/v2/pet/{petId}",
        endpoint: Endpoint::UpdatePet,
    },
];

/// All registered routes
pub fn routes() -> &'static [Route] {
    &ROUTES
}

/// Look up a route by name
pub fn find_route(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.name == name)
}

/// Build a concrete URL for a named route
pub fn url_for(name: &str, param: Option<&str>) -> Option<String> {
    find_route(name).map(|r| r.url(param))
}

fn placeholder_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

impl Route {
    /// Name of the placeholder segment, if the template has one
    pub fn placeholder(&self) -> Option<&'static str> {
        self.pattern.split('/').find_map(placeholder_name)
    }

    /// Template in axum syntax (`/v2/pet/:petId`)
    pub fn axum_path(&self) -> String {
        self.pattern
            .split('/')
            .map(|seg| match placeholder_name(seg) {
                Some(name) => format!(":{}", name),
                None => seg.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Substitute the placeholder; templates without one ignore `param`
    pub fn url(&self, param: Option<&str>) -> String {
        self.pattern
            .split('/')
            .map(|seg| match (placeholder_name(seg), param) {
                (Some(_), Some(value)) => value,
                _ => seg,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Whether a request with `method` routed to `matched` (axum syntax) is this route
    pub fn matches(&self, method: &Method, matched: &str) -> bool {
        if self.method != *method {
            return false;
        }
        let mut ours = self.pattern.split('/');
        let mut theirs = matched.split('/');
        loop {
            match (ours.next(), theirs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) => {
                    let same = match (placeholder_name(a), b.strip_prefix(':')) {
                        (Some(x), Some(y)) => x == y,
                        (None, None) => a == b,
                        _ => false,
                    };
                    if !same {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }

    fn method_filter(&self) -> MethodFilter {
        if self.method == Method::POST {
            MethodFilter::POST
        } else if self.method == Method::PUT {
            MethodFilter::PUT
        } else if self.method == Method::DELETE {
            MethodFilter::DELETE
        } else {
            MethodFilter::GET
        }
    }

    fn bind<S: PetStore + 'static>(
        &self,
        router: MethodRouter<ApiState<S>>,
    ) -> MethodRouter<ApiState<S>> {
        let filter = self.method_filter();
        match self.endpoint {
            Endpoint::AddPet => router.on(filter, handler::add_pet::<S>),
            Endpoint::DeletePet => router.on(filter, handler::delete_pet::<S>),
            Endpoint::GetPets => router.on(filter, handler::get_pets::<S>),
            Endpoint::GetPetById => router.on(filter, handler::get_pet_by_id::<S>),
            Endpoint::UpdatePet => router.on(filter, handler::update_pet::<S>),
        }
    }
}

/// Log each request that hit a named route
async fn log_route(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .and_then(|matched| {
            routes()
                .iter()
                .find(|r| r.matches(request.method(), matched.as_str()))
        });

    let Some(route) = route else {
        return next.run(request).await;
    };

    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        %uri,
        route = route.name,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}

async fn method_not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Build the pet API router.
///
/// Routes sharing a template are grouped into one method router; an
/// unregistered method on a known template answers a bare 404.
pub fn pet_router<S: PetStore + 'static>(state: ApiState<S>) -> Router {
    let mut by_path: BTreeMap<String, MethodRouter<ApiState<S>>> = BTreeMap::new();
    for route in routes() {
        let path = route.axum_path();
        let router = by_path
            .remove(&path)
            .unwrap_or_else(|| MethodRouter::new().fallback(method_not_found));
        by_path.insert(path, route.bind(router));
    }

    by_path
        .into_iter()
        .fold(Router::new(), |router, (path, methods)| {
            router.route(&path, methods)
        })
        .route_layer(middleware::from_fn(log_route))
        .with_state(state)
}
