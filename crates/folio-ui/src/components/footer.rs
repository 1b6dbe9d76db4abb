use std::rc::Rc;

use folio_core::SiteConfig;
use yew::{
  Html,
  function_component,
  html,
  use_context
};

#[function_component(Footer)]
pub fn footer() -> Html {
  let site = use_context::<Rc<SiteConfig>>()
    .unwrap_or_default();
  let year =
    js_sys::Date::new_0().get_full_year();

  html! {
      <footer>
          { format!("© {year} {}", site.owner) }
      </footer>
  }
}
