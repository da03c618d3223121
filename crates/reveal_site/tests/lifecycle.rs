//! Mount, unmount and re-mount behavior of the navigation host

use reveal_core::{Property, RenderSurface, Viewport};
use reveal_site::views::MenuState;
use reveal_site::{Route, Site};

fn site(route: Route) -> Site {
    let mut site = Site::new(Viewport::new(1280.0, 800.0));
    site.navigate(route);
    site
}

#[test]
fn navigating_away_detaches_previous_page() {
    let mut site = site(Route::Projects);
    let old = site.page_reveals().to_vec();
    let gate = old.iter().find_map(|r| r.gate.clone()).unwrap();
    assert!(gate.is_attached());

    site.scroll_to(200.0);
    site.navigate(Route::About);

    assert!(!gate.is_attached());
    assert!(old.iter().all(|r| !r.timeline.is_alive()));
    assert_eq!(site.scheduler().gate_count(), 0);
    assert_eq!(site.viewport().scroll_y, 0.0);
}

#[test]
fn unmounted_site_never_mutates_surface() {
    let mut site = site(Route::Contact);
    site.frame(100.0);
    site.scroll_to(300.0);
    site.unmount();

    let before = site.surface().mutation_count();
    site.scroll_to(600.0);
    for _ in 0..20 {
        site.frame(16.0);
    }
    assert_eq!(site.surface().mutation_count(), before);
    assert_eq!(site.scheduler().timeline_count(), 0);
    assert_eq!(site.scheduler().scope_count(), 0);
}

#[test]
fn stale_handles_are_inert_after_close() {
    let mut site = site(Route::About);
    let stale = site.page_reveals()[0].timeline.clone();
    site.navigate(Route::Resume);

    let before = site.surface().mutation_count();
    stale.play();
    stale.restart(&mut reveal_core::SceneSurface::new());
    assert_eq!(stale.state(), None);
    assert_eq!(site.surface().mutation_count(), before);
}

#[test]
fn remount_does_not_accumulate() {
    let mut site = site(Route::Projects);
    let timelines = site.scheduler().timeline_count();
    let gates = site.scheduler().gate_count();
    let scopes = site.scheduler().scope_count();
    assert_eq!(scopes, 3);

    for _ in 0..3 {
        site.navigate(Route::Projects);
    }

    assert_eq!(site.scheduler().timeline_count(), timelines);
    assert_eq!(site.scheduler().gate_count(), gates);
    assert_eq!(site.scheduler().scope_count(), scopes);
}

#[test]
fn remount_rederives_targets() {
    let mut site = site(Route::About);
    let first = site.page_reveals()[0].timeline.timeline().unwrap().elements();
    site.navigate(Route::About);
    let second = site.page_reveals()[0].timeline.timeline().unwrap().elements();

    assert_eq!(first.len(), second.len());
    assert!(first.iter().all(|e| !second.contains(e)));
    assert!(first.iter().all(|e| !site.surface().is_attached(*e)));
}

#[test]
fn mobile_menu_opens_and_closes_in_nested_scope() {
    let mut site = site(Route::About);
    site.settle(16.0, 1000);
    assert_eq!(site.scheduler().scope_count(), 3);

    assert_eq!(site.toggle_menu(), MenuState::Open);
    let menu = site.navbar().and_then(|n| n.menu_element()).unwrap();
    assert_eq!(site.surface().property(menu, Property::Opacity), Some(0.0));
    assert_eq!(site.scheduler().scope_count(), 4);

    site.settle(16.0, 100);
    assert_eq!(site.surface().property(menu, Property::Opacity), Some(1.0));
    assert_eq!(site.surface().property(menu, Property::Y), Some(0.0));

    assert_eq!(site.toggle_menu(), MenuState::Closing);
    site.settle(16.0, 100);

    assert_eq!(site.navbar().map(|n| n.menu_state()), Some(MenuState::Closed));
    assert!(!site.surface().is_attached(menu));
    assert_eq!(site.scheduler().scope_count(), 3);
}

#[test]
fn closing_navbar_closes_open_menu() {
    let mut site = site(Route::About);
    site.toggle_menu();
    assert_eq!(site.scheduler().scope_count(), 4);

    site.navigate(Route::Contact);
    assert_eq!(site.scheduler().scope_count(), 3);
    assert_eq!(
        site.navbar().map(|n| n.menu_state()),
        Some(MenuState::Closed)
    );
}
