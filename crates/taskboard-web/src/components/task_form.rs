use taskboard_core::{
  Categories,
  TaskForm
};
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement
};
use yew::{
  Callback,
  Html,
  NodeRef,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskFormPanelProps {
  pub categories: Categories,
  pub form:       TaskForm,
  pub title_ref:  NodeRef,
  pub on_change:  Callback<TaskForm>,
  pub on_submit:  Callback<TaskForm>,
  pub on_reset:   Callback<()>
}

#[function_component(TaskFormPanel)]
pub fn task_form_panel(
  props: &TaskFormPanelProps
) -> Html {
  let on_title = {
    let form = props.form.clone();
    let on_change =
      props.on_change.clone();
    move |e: web_sys::InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_change.emit(TaskForm {
        title: input.value(),
        ..form.clone()
      });
    }
  };
  let on_category = {
    let form = props.form.clone();
    let on_change =
      props.on_change.clone();
    move |e: web_sys::Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      on_change.emit(TaskForm {
        category: select.value(),
        ..form.clone()
      });
    }
  };
  let on_due = {
    let form = props.form.clone();
    let on_change =
      props.on_change.clone();
    move |e: web_sys::Event| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_change.emit(TaskForm {
        due: input.value(),
        ..form.clone()
      });
    }
  };
  let on_submit = {
    let form = props.form.clone();
    let on_submit =
      props.on_submit.clone();
    move |e: web_sys::SubmitEvent| {
      e.prevent_default();
      on_submit.emit(form.clone());
    }
  };
  let on_reset = {
    let on_reset =
      props.on_reset.clone();
    move |e: web_sys::MouseEvent| {
      e.prevent_default();
      on_reset.emit(());
    }
  };

  html! {
      <form class="task-form row g-2" onsubmit={on_submit}>
          <div class="col-md-5">
              <input
                  ref={props.title_ref.clone()}
                  class="form-control"
                  type="text"
                  placeholder="What needs doing?"
                  value={props.form.title.clone()}
                  oninput={on_title}
              />
          </div>
          <div class="col-md-3">
              <select class="form-select" onchange={on_category}>
                  <option value="" selected={props.form.category.is_empty()}>{ "Category" }</option>
                  {
                      for props.categories.iter().map(|category| {
                          let selected = props.form.category == category.as_str();
                          html! {
                              <option value={category.to_string()} selected={selected}>{ category.to_string() }</option>
                          }
                      })
                  }
              </select>
          </div>
          <div class="col-md-2">
              <input class="form-control" type="date" value={props.form.due.clone()} onchange={on_due} />
          </div>
          <div class="col-md-2 d-flex gap-1">
              <button class="btn btn-primary" type="submit">{ "Add" }</button>
              <button class="btn btn-outline-secondary" type="button" onclick={on_reset}>{ "Reset" }</button>
          </div>
      </form>
  }
}
