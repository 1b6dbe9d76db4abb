use std::rc::Rc;

use folio_core::SiteConfig;
use yew::{
  Html,
  function_component,
  html,
  use_context
};

#[function_component(ResumePage)]
pub fn resume_page() -> Html {
  let site = use_context::<Rc<SiteConfig>>()
    .unwrap_or_default();
  let url = site.resume_url.clone();

  html! {
      <main>
          <h1>{ "Resume" }</h1>
          <p>
              <a class="btn btn-primary" href={url.clone()} download="">
                  <i class="bi bi-download"></i>{ " Download" }
              </a>
          </p>
          <iframe class="resume-frame" src={url} title="Resume"></iframe>
      </main>
  }
}
