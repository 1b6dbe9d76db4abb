use std::rc::Rc;

use folio_core::SiteConfig;
use yew::{
  Html,
  classes,
  function_component,
  html,
  use_context
};
use yew_router::prelude::Link;

use crate::app::Route;

#[function_component(HomePage)]
pub fn home_page() -> Html {
  let site = use_context::<Rc<SiteConfig>>()
    .unwrap_or_default();

  html! {
      <main>
          <h1 class="display-5">{ &site.owner }</h1>
          <p class="lead">{ &site.tagline }</p>
          <div class="d-flex gap-2">
              <Link<Route> to={Route::Projects} classes={classes!("btn", "btn-primary")}>
                  { "Browse projects" }
              </Link<Route>>
              {
                  if site.github_url.is_empty() {
                      html! {}
                  } else {
                      html! {
                          <a class="btn btn-outline-secondary" href={site.github_url.clone()}>
                              <i class="bi bi-github"></i>{ " GitHub" }
                          </a>
                      }
                  }
              }
          </div>
      </main>
  }
}
