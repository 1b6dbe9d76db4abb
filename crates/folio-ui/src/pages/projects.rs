use std::rc::Rc;

use folio_core::{
  CatalogAction,
  LoadLatch,
  LoadState,
  ProjectCatalog,
  SiteConfig,
  fetch_snapshot
};
use yew::{
  Callback,
  Html,
  Reducible,
  function_component,
  html,
  use_context,
  use_effect_with,
  use_mut_ref,
  use_reducer
};

use crate::api::FirestoreStore;
use crate::components::{
  FilterButtons,
  ProjectSection
};

/// Reducer wrapper: every catalog change
/// goes through a dispatched
/// [`CatalogAction`].
#[derive(Clone, Default, PartialEq)]
struct CatalogHandle {
  catalog: ProjectCatalog
}

impl Reducible for CatalogHandle {
  type Action = CatalogAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    next.catalog.apply(action);
    Rc::new(next)
  }
}

#[function_component(ProjectsPage)]
pub fn projects_page() -> Html {
  let site = use_context::<Rc<SiteConfig>>()
    .unwrap_or_default();
  let handle =
    use_reducer(CatalogHandle::default);
  let latch = use_mut_ref(LoadLatch::default);

  {
    let dispatcher = handle.dispatcher();
    let firestore =
      site.firestore.clone();
    let has_store = site.has_store();
    use_effect_with((), move |_| {
      if !latch.borrow_mut().try_start() {
        tracing::warn!(
          "project load already started; \
           skipping"
        );
      } else if !has_store {
        dispatcher.dispatch(
          CatalogAction::LoadFailed(
            "no document store configured"
              .to_string()
          )
        );
      } else {
        dispatcher
          .dispatch(CatalogAction::LoadStarted);
        let store =
          FirestoreStore::new(firestore);
        wasm_bindgen_futures::spawn_local(
          async move {
            match fetch_snapshot(&store)
              .await
            {
              | Ok(snapshot) => {
                dispatcher.dispatch(
                  CatalogAction::Loaded(
                    snapshot
                  )
                )
              }
              | Err(error) => {
                dispatcher.dispatch(
                  CatalogAction::LoadFailed(
                    format!("{error:#}")
                  )
                )
              }
            }
          }
        );
      }
      || ()
    });
  }

  let on_toggle = {
    let dispatcher = handle.dispatcher();
    Callback::from(
      move |(tag, enabled): (String, bool)| {
        tracing::debug!(
          tag = %tag,
          enabled,
          "filter toggled"
        );
        dispatcher.dispatch(
          CatalogAction::SetFilter {
            tag,
            enabled
          }
        );
      }
    )
  };

  let catalog = &handle.catalog;
  let featured: Vec<_> = catalog
    .visible_featured()
    .into_iter()
    .cloned()
    .collect();
  let general: Vec<_> = catalog
    .visible_general()
    .into_iter()
    .cloned()
    .collect();

  let status = match catalog.state() {
    | LoadState::Idle
    | LoadState::Loading => {
      html! {
          <div class="d-flex align-items-center gap-2 mb-4">
              <div class="spinner-border spinner-border-sm" role="status"></div>
              <span>{ "Loading projects..." }</span>
          </div>
      }
    }
    | LoadState::Failed(message) => {
      html! {
          <div class="alert alert-danger" role="alert">
              { format!("Projects could not be loaded: {message}") }
          </div>
      }
    }
    | LoadState::Ready => html! {}
  };

  html! {
      <main>
          { status }
          <FilterButtons
              tags={catalog.tags().to_vec()}
              filter={catalog.filter().clone()}
              {on_toggle}
          />
          <ProjectSection title="Featured Projects" projects={featured} />
          <ProjectSection title="Projects" projects={general} />
      </main>
  }
}
