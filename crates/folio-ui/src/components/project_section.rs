use folio_core::Project;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

use super::ProjectCard;

#[derive(Properties, PartialEq)]
pub struct ProjectSectionProps {
  pub title:    String,
  /// Already filtered.
  pub projects: Vec<Project>
}

#[function_component(ProjectSection)]
pub fn project_section(
  props: &ProjectSectionProps
) -> Html {
  html! {
      <section>
          <h3>{ &props.title }</h3>
          {
              if props.projects.is_empty() {
                  html! { <p>{ "No matching projects were found!" }</p> }
              } else {
                  html! {
                      <div class="project-grid">
                          {
                              for props.projects.iter().map(|project| html! {
                                  <ProjectCard key={project.title.clone()} project={project.clone()} />
                              })
                          }
                      </div>
                  }
              }
          }
      </section>
  }
}
