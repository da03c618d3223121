//! Site routes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    About,
    Resume,
    Projects,
    Contact,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown route '{0}' (expected one of /, /resume, /projects, /contact)")]
pub struct RouteError(pub String);

impl Route {
    pub const ALL: [Route; 4] = [Route::About, Route::Resume, Route::Projects, Route::Contact];

    pub fn path(&self) -> &'static str {
        match self {
            Route::About => "/",
            Route::Resume => "/resume",
            Route::Projects => "/projects",
            Route::Contact => "/contact",
        }
    }

    /// Label used in navigation links
    pub fn title(&self) -> &'static str {
        match self {
            Route::About => "ABOUT ME",
            Route::Resume => "RESUME",
            Route::Projects => "PROJECTS",
            Route::Contact => "CONTACT",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    /// Accepts a path (`/resume`) or a bare name (`resume`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('/').to_ascii_lowercase();
        match name.as_str() {
            "" | "about" => Ok(Route::About),
            "resume" => Ok(Route::Resume),
            "project" | "projects" => Ok(Route::Projects),
            "contact" => Ok(Route::Contact),
            _ => Err(RouteError(s.to_string())),
        }
    }
}
