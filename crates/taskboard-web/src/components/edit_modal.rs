use taskboard_core::{
  Categories,
  EditForm
};
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct EditModalProps {
  pub categories: Categories,
  pub form:       EditForm,
  pub on_change:  Callback<EditForm>,
  pub on_submit:  Callback<EditForm>,
  pub on_cancel:  Callback<()>
}

#[function_component(EditModal)]
pub fn edit_modal(
  props: &EditModalProps
) -> Html {
  let on_title = {
    let form = props.form.clone();
    let on_change =
      props.on_change.clone();
    move |e: web_sys::InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_change.emit(EditForm {
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
      on_change.emit(EditForm {
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
      on_change.emit(EditForm {
        due: input.value(),
        ..form.clone()
      });
    }
  };
  let on_completed = {
    let form = props.form.clone();
    let on_change =
      props.on_change.clone();
    move |e: web_sys::Event| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_change.emit(EditForm {
        completed: input.checked(),
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
  let on_cancel = {
    let on_cancel =
      props.on_cancel.clone();
    move |_| on_cancel.emit(())
  };

  html! {
      <div class="modal-backdrop-lite">
          <div class="modal-dialog">
              <form class="modal-content p-3" onsubmit={on_submit}>
                  <h5 class="modal-title mb-3">{ "Edit task" }</h5>
                  <input class="form-control mb-2" type="text" value={props.form.title.clone()} oninput={on_title} />
                  <select class="form-select mb-2" onchange={on_category}>
                      {
                          for props.categories.iter().map(|category| {
                              let selected = props.form.category == category.as_str();
                              html! {
                                  <option value={category.to_string()} selected={selected}>{ category.to_string() }</option>
                              }
                          })
                      }
                  </select>
                  <input class="form-control mb-2" type="date" value={props.form.due.clone()} onchange={on_due} />
                  <label class="form-check mb-3">
                      <input class="form-check-input" type="checkbox" checked={props.form.completed} onchange={on_completed} />
                      <span class="form-check-label">{ "Completed" }</span>
                  </label>
                  <div class="d-flex justify-content-end gap-2">
                      <button class="btn btn-secondary" type="button" onclick={on_cancel}>{ "Cancel" }</button>
                      <button class="btn btn-primary" type="submit">{ "Save changes" }</button>
                  </div>
              </form>
          </div>
      </div>
  }
}
