use std::rc::Rc;

use folio_core::nav::nav_key;
use folio_core::{
  SiteConfig,
  ThemeController,
  ThemeMode
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  classes,
  function_component,
  html,
  use_context,
  use_effect_with,
  use_mut_ref,
  use_state
};
use yew_router::prelude::{
  Link,
  use_location
};

use crate::app::Route;
use crate::storage::{
  BrowserStorage,
  DocumentTheme
};

const NAV_ITEMS: [(&str, &str); 3] = [
  ("/", "Home"),
  ("/projects", "Projects"),
  ("/resume", "Resume")
];

fn route_for(key: &str) -> Route {
  match key {
    | "/projects" => Route::Projects,
    | "/resume" => Route::Resume,
    | _ => Route::Home
  }
}

#[function_component(Header)]
pub fn header() -> Html {
  let site = use_context::<Rc<SiteConfig>>()
    .unwrap_or_default();
  let controller = use_mut_ref(|| {
    ThemeController::new(
      BrowserStorage,
      DocumentTheme
    )
  });
  let mode = use_state(ThemeMode::default);

  {
    let controller = controller.clone();
    let mode = mode.clone();
    use_effect_with((), move |_| {
      let mut controller =
        controller.borrow_mut();
      controller.initialize();
      mode.set(controller.mode());
      || ()
    });
  }

  let on_toggle = {
    let controller = controller.clone();
    let mode = mode.clone();
    Callback::from(move |_: MouseEvent| {
      let mut controller =
        controller.borrow_mut();
      controller.toggle();
      mode.set(controller.mode());
    })
  };

  let path = use_location()
    .map(|location| {
      location.path().to_string()
    })
    .unwrap_or_default();
  let active = nav_key(&path);

  html! {
      <header class="sticky-top">
          <nav class="navbar bg-dark" data-bs-theme="dark">
              <div class="container">
                  <ul class="nav nav-underline align-items-center">
                      <Link<Route> to={Route::Home} classes={classes!("navbar-brand")}>{ &site.owner }</Link<Route>>
                      {
                          for NAV_ITEMS.iter().map(|(key, label)| {
                              let is_active = active.eq_ignore_ascii_case(key);
                              html! {
                                  <li class="nav-item">
                                      <Link<Route>
                                          to={route_for(key)}
                                          classes={classes!("nav-link", is_active.then_some("active"))}
                                      >
                                          { *label }
                                      </Link<Route>>
                                  </li>
                              }
                          })
                      }
                  </ul>
                  <button
                      type="button"
                      class="btn btn-link"
                      title={mode.toggle_label()}
                      onclick={on_toggle}
                  >
                      <i class={format!("bi bi-{}-fill", mode.toggle_icon())}></i>
                  </button>
              </div>
          </nav>
      </header>
  }
}
