use folio_core::Project;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ProjectCardProps {
  pub project: Project
}

#[function_component(ProjectCard)]
pub fn project_card(
  props: &ProjectCardProps
) -> Html {
  let project = &props.project;

  html! {
      <div class="card">
          {
              if let Some(image) = project.image.clone() {
                  html! { <img class="card-img-top" src={image} alt={project.title.clone()} /> }
              } else {
                  html! {}
              }
          }
          <div class="card-body">
              <h5 class="card-title">{ &project.title }</h5>
              <p class="card-text">{ &project.desc }</p>
              <p class="card-text">{ format!("Tags: {}", project.joined_tags()) }</p>
              {
                  if let Some(sim) = project.sim.clone() {
                      html! { <a class="btn btn-primary" href={sim}>{ "Run Simulation" }</a> }
                  } else {
                      html! {}
                  }
              }
              <a class="btn btn-primary" href={project.repo.clone()}>
                  { "View repository on GitHub" }
              </a>
          </div>
      </div>
  }
}
