use feedback_types::Route;
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

/// State for the top navigation header.
///
/// The header shows a brand mark that links back to the home route, the
/// application title, and a reserved right-hand slot that is currently empty.
#[derive(Debug, Clone)]
pub struct NavBarState {
    /// Brand mark drawn as a button (e.g. "[CS]").
    pub brand_icon: String,
    /// Title drawn next to the brand.
    pub title: String,
    /// Route the brand links to.
    pub home_route: Route,
    /// Route currently displayed; used for the subtitle.
    pub current_route: Route,
    /// Focus flag for the container in the global focus tree.
    pub container_focus: FocusFlag,
    /// Focus flag for the brand link.
    pub f_brand: FocusFlag,
    /// Last rendered area of the header; used for mouse hit testing.
    pub last_area: Rect,
    /// Last rendered brand area.
    pub brand_area: Rect,
}

impl NavBarState {
    pub fn new(brand_icon: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            brand_icon: brand_icon.into(),
            title: title.into(),
            home_route: Route::Home,
            current_route: Route::Home,
            container_focus: FocusFlag::named("nav"),
            f_brand: FocusFlag::named("nav.brand"),
            last_area: Rect::default(),
            brand_area: Rect::default(),
        }
    }

    pub fn set_route(&mut self, route: Route) -> Route {
        self.current_route = route;
        route
    }
}

impl Default for NavBarState {
    fn default() -> Self {
        Self::new("[CS]", "Customer Satisfaction")
    }
}

impl HasFocus for NavBarState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_brand);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}
