use yew::{
  Html,
  function_component,
  html
};
use yew_router::prelude::Link;

use crate::app::Route;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
  html! {
      <main>
          <h1>{ "404" }</h1>
          <p>{ "That page does not exist." }</p>
          <Link<Route> to={Route::Home}>{ "Back home" }</Link<Route>>
      </main>
  }
}
