use folio_core::FilterState;
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Event,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterButtonsProps {
  pub tags:      Vec<String>,
  pub filter:    FilterState,
  /// `(tag, enabled)`
  pub on_toggle: Callback<(String, bool)>
}

#[function_component(FilterButtons)]
pub fn filter_buttons(
  props: &FilterButtonsProps
) -> Html {
  html! {
      <div class="container-fluid mb-5" id="filter-container">
          <p id="filter-label">{ "Filter by tag:" }</p>
          <div class="filter-btns" role="group">
              {
                  for props.tags.iter().map(|tag| {
                      let id = format!("filter-{tag}");
                      let checked = props.filter.is_enabled(tag);
                      let on_toggle = props.on_toggle.clone();
                      let tag_name = tag.clone();
                      let onchange = Callback::from(move |e: Event| {
                          let input: HtmlInputElement = e.target_unchecked_into();
                          on_toggle.emit((tag_name.clone(), input.checked()));
                      });
                      html! {
                          <>
                              <input
                                  type="checkbox"
                                  class="btn-check"
                                  id={id.clone()}
                                  value={tag.clone()}
                                  checked={checked}
                                  autocomplete="off"
                                  {onchange}
                              />
                              <label class="btn btn-outline-primary" for={id}>{ tag }</label>
                          </>
                      }
                  })
              }
          </div>
      </div>
  }
}
