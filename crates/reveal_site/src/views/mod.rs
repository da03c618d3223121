//! Site views

pub mod about;
pub mod contact;
pub mod footer;
pub mod navbar;
pub mod projects;
pub mod resume;

pub use about::AboutView;
pub use contact::ContactView;
pub use footer::FooterView;
pub use navbar::{MenuState, NavbarView};
pub use projects::ProjectsView;
pub use resume::ResumeView;

use crate::route::Route;
use crate::view::View;

/// The page body for a route
pub fn page_for(route: Route) -> Box<dyn View> {
    match route {
        Route::About => Box::new(AboutView::new()),
        Route::Resume => Box::new(ResumeView::new()),
        Route::Projects => Box::new(ProjectsView::new()),
        Route::Contact => Box::new(ContactView::new()),
    }
}
