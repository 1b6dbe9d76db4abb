use std::rc::Rc;

use folio_core::SiteConfig;
use yew::{
  ContextProvider,
  Html,
  function_component,
  html,
  use_memo
};
use yew_router::prelude::{
  BrowserRouter,
  Routable,
  Switch
};

use crate::components::{
  Footer,
  Header
};
use crate::pages::{
  HomePage,
  NotFoundPage,
  ProjectsPage,
  ResumePage
};
use crate::site::load_site_config;

#[derive(
  Clone, Debug, PartialEq, Routable,
)]
pub enum Route {
  #[at("/")]
  Home,
  #[at("/projects")]
  Projects,
  #[at("/resume")]
  Resume,
  #[at("/Resume")]
  ResumeLegacy,
  #[not_found]
  #[at("/404")]
  NotFound
}

fn switch(route: Route) -> Html {
  tracing::debug!(
    route = ?route,
    "rendering route"
  );
  match route {
    | Route::Home => {
      html! { <HomePage /> }
    }
    | Route::Projects => {
      html! { <ProjectsPage /> }
    }
    | Route::Resume
    | Route::ResumeLegacy => {
      html! { <ResumePage /> }
    }
    | Route::NotFound => {
      html! { <NotFoundPage /> }
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let site: Rc<SiteConfig> =
    use_memo((), |_| load_site_config());

  html! {
      <ContextProvider<Rc<SiteConfig>> context={site}>
          <BrowserRouter>
              <Header />
              <Switch<Route> render={switch} />
          </BrowserRouter>
          <Footer />
      </ContextProvider<Rc<SiteConfig>>>
  }
}
