use taskboard_core::{
  TaskCard,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskCardViewProps {
  pub card:      TaskCard,
  pub on_edit:   Callback<TaskId>,
  pub on_toggle: Callback<TaskId>,
  pub on_delete: Callback<TaskId>
}

/// Yew text nodes are escaped on insertion, so card text is passed through
/// as-is.
#[function_component(TaskCardView)]
pub fn task_card_view(
  props: &TaskCardViewProps
) -> Html {
  let card = &props.card;

  let on_edit = {
    let id = card.id.clone();
    let on_edit = props.on_edit.clone();
    move |_| on_edit.emit(id.clone())
  };
  let on_toggle = {
    let id = card.id.clone();
    let on_toggle =
      props.on_toggle.clone();
    move |_| on_toggle.emit(id.clone())
  };
  let on_delete = {
    let id = card.id.clone();
    let on_delete =
      props.on_delete.clone();
    move |_| on_delete.emit(id.clone())
  };

  let card_class = classes!(
    "card",
    "h-100",
    card.highlight.then_some("new-pulse"),
    card.fading.then_some("fade-out"),
    card.completed.then_some("done")
  );

  html! {
      <div class="col-12 col-sm-6 col-md-4 task-card">
          <div class={card_class} data-id={card.id.to_string()}>
              <div class="card-body d-flex flex-column">
                  <div class="d-flex justify-content-between align-items-start mb-2">
                      <h6 class="card-title mb-0">{ &card.title }</h6>
                      <span class="badge badge-category bg-secondary">{ &card.category }</span>
                  </div>
                  <p class="card-text text-muted mb-2">{ format!("Due: {}", card.due) }</p>
                  <div class="mt-auto d-flex justify-content-between align-items-center">
                      <div class="btn-group" role="group" aria-label="Task actions">
                          <button class="btn btn-sm btn-outline-primary btn-edit" onclick={on_edit}>{ "Edit" }</button>
                          <button class={classes!("btn", "btn-sm", card.toggle_class(), "btn-toggle")} onclick={on_toggle}>
                              { card.toggle_label() }
                          </button>
                      </div>
                      <div>
                          <button class="btn btn-sm btn-danger btn-delete" title="Delete task" onclick={on_delete}>{ "Delete" }</button>
                      </div>
                  </div>
              </div>
              <div class="card-footer text-end">
                  <small class="text-muted">{ format!("Created: {}", card.created) }</small>
              </div>
          </div>
      </div>
  }
}
