use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo::timers::callback::Timeout;
use taskboard_core::{
  Categories,
  CategoryFilter,
  Confirm,
  Controller,
  DeleteOutcome,
  EditForm,
  Focus,
  KeyValueStorage,
  StatusFilter,
  SystemClock,
  TaskForm,
  TaskId
};
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  NodeRef,
  TargetCast,
  function_component,
  html,
  use_effect,
  use_force_update,
  use_mut_ref,
  use_node_ref,
  use_state
};

use crate::components::{
  EditModal,
  FilterBar,
  StatsBar,
  TaskCardView,
  TaskFormPanel
};
use crate::storage::browser_storage;

type BoardController = Controller<
  Box<dyn KeyValueStorage>,
  SystemClock
>;
type SharedController =
  Rc<RefCell<BoardController>>;

struct WindowConfirm;

impl Confirm for WindowConfirm {
  fn confirm(
    &self,
    message: &str
  ) -> bool {
    web_sys::window()
      .and_then(|window| {
        window
          .confirm_with_message(message)
          .ok()
      })
      .unwrap_or(false)
  }
}

fn alert(message: &str) {
  if let Some(window) = web_sys::window()
  {
    let _ =
      window.alert_with_message(message);
  }
}

/// Saturates instead of wrapping for
/// delays too long for a browser timer.
fn timeout_millis(
  delay: Duration
) -> u32 {
  u32::try_from(delay.as_millis())
    .unwrap_or(u32::MAX)
}

fn focus_title(title_ref: &NodeRef) {
  if let Some(input) =
    title_ref.cast::<HtmlInputElement>()
    && let Err(error) = input.focus()
  {
    tracing::warn!(?error, "failed focusing title input");
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let controller: SharedController =
    use_mut_ref(|| {
      Controller::start(
        browser_storage(),
        Categories::default(),
        SystemClock
      )
    });
  let force_update = use_force_update();
  let title_ref = use_node_ref();
  let draft = use_state(TaskForm::default);
  let edit_draft =
    use_state(|| None::<EditForm>);

  {
    let controller = controller.clone();
    let title_ref = title_ref.clone();
    use_effect(move || {
      if controller.borrow_mut().take_focus()
        == Focus::AddTitle
      {
        focus_title(&title_ref);
      }
    });
  }

  let refresh = {
    let force_update =
      force_update.clone();
    Callback::from(move |()| {
      force_update.force_update()
    })
  };

  let on_draft_change = {
    let draft = draft.clone();
    Callback::from(
      move |next: TaskForm| {
        draft.set(next)
      }
    )
  };

  let on_submit_create = {
    let controller = controller.clone();
    let draft = draft.clone();
    let refresh = refresh.clone();
    Callback::from(
      move |form: TaskForm| {
        let result = controller
          .borrow_mut()
          .on_submit_create(form);
        match result {
          | Ok(id) => {
            tracing::info!(%id, "task added");
            draft.set(
              controller
                .borrow()
                .add_form()
                .clone()
            );
          }
          | Err(error) => {
            tracing::warn!(%error, "task not added");
            alert(&error.to_string());
          }
        }
        refresh.emit(());
      }
    )
  };

  let on_reset = {
    let controller = controller.clone();
    let draft = draft.clone();
    let refresh = refresh.clone();
    Callback::from(move |()| {
      controller
        .borrow_mut()
        .on_reset_form();
      draft.set(TaskForm::default());
      refresh.emit(());
    })
  };

  let on_show_add_task = {
    let controller = controller.clone();
    let refresh = refresh.clone();
    Callback::from(
      move |_: web_sys::MouseEvent| {
        if let Some(window) =
          web_sys::window()
        {
          window.scroll_to_with_x_and_y(
            0.0, 0.0
          );
        }
        controller
          .borrow_mut()
          .on_show_add_task();
        refresh.emit(());
      }
    )
  };

  let on_edit = {
    let controller = controller.clone();
    let edit_draft = edit_draft.clone();
    Callback::from(move |id: TaskId| {
      let form = controller
        .borrow_mut()
        .on_open_edit(&id)
        .cloned();
      edit_draft.set(form);
    })
  };

  let on_edit_change = {
    let edit_draft = edit_draft.clone();
    Callback::from(
      move |next: EditForm| {
        edit_draft.set(Some(next))
      }
    )
  };

  let on_edit_submit = {
    let controller = controller.clone();
    let edit_draft = edit_draft.clone();
    let refresh = refresh.clone();
    Callback::from(
      move |form: EditForm| {
        let result = controller
          .borrow_mut()
          .on_submit_edit(form);
        match result {
          | Ok(()) => {
            edit_draft.set(None);
            refresh.emit(());
          }
          | Err(error) => {
            tracing::warn!(%error, "task not updated");
            alert(&error.to_string());
          }
        }
      }
    )
  };

  let on_edit_cancel = {
    let controller = controller.clone();
    let edit_draft = edit_draft.clone();
    Callback::from(move |()| {
      controller
        .borrow_mut()
        .on_cancel_edit();
      edit_draft.set(None);
    })
  };

  let on_toggle = {
    let controller = controller.clone();
    let refresh = refresh.clone();
    Callback::from(move |id: TaskId| {
      if let Err(error) = controller
        .borrow_mut()
        .on_toggle(&id)
      {
        tracing::error!(%error, "failed saving toggled task");
      }
      refresh.emit(());
    })
  };

  let on_delete = {
    let controller = controller.clone();
    let refresh = refresh.clone();
    Callback::from(move |id: TaskId| {
      let outcome = controller
        .borrow_mut()
        .on_delete(&id);
      match outcome {
        | Ok(DeleteOutcome::Deferred(
          delay
        )) => {
          let controller =
            controller.clone();
          let refresh = refresh.clone();
          Timeout::new(
            timeout_millis(delay),
            move || {
              if let Err(error) = controller
                .borrow_mut()
                .on_delete_elapsed(&id)
              {
                tracing::error!(%error, "failed saving after delete");
              }
              refresh.emit(());
            }
          )
          .forget();
        }
        | Ok(DeleteOutcome::Immediate) => {}
        | Err(error) => {
          tracing::error!(%error, "failed saving after delete");
        }
      }
      refresh.emit(());
    })
  };

  let on_category = {
    let controller = controller.clone();
    let refresh = refresh.clone();
    Callback::from(
      move |filter: CategoryFilter| {
        controller
          .borrow_mut()
          .on_filter_category(filter);
        refresh.emit(());
      }
    )
  };

  let on_status = {
    let controller = controller.clone();
    let refresh = refresh.clone();
    Callback::from(
      move |filter: StatusFilter| {
        controller
          .borrow_mut()
          .on_filter_status(filter);
        refresh.emit(());
      }
    )
  };

  let on_clear_completed = {
    let controller = controller.clone();
    let refresh = refresh.clone();
    Callback::from(move |()| {
      if let Err(error) = controller
        .borrow_mut()
        .on_clear_completed()
      {
        tracing::error!(%error, "failed saving after clearing completed");
      }
      refresh.emit(());
    })
  };

  let on_clear_all = {
    let controller = controller.clone();
    let refresh = refresh.clone();
    Callback::from(move |()| {
      match controller
        .borrow_mut()
        .on_clear_all(&WindowConfirm)
      {
        | Ok(true) => {
          tracing::warn!("cleared all tasks")
        }
        | Ok(false) => {}
        | Err(error) => {
          tracing::error!(%error, "failed saving after clearing all");
        }
      }
      refresh.emit(());
    })
  };

  let on_theme = {
    let controller = controller.clone();
    let refresh = refresh.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        controller
          .borrow_mut()
          .on_theme_toggle(
            input.checked()
          );
        refresh.emit(());
      }
    )
  };

  let ctl = controller.borrow();
  let theme = ctl.theme();
  let rendered = ctl.rendered().clone();
  let filters = ctl.filters().clone();
  let categories =
    ctl.categories().clone();
  drop(ctl);

  html! {
      <div class={format!("board {}", theme.as_class())}>
          <nav class="navbar px-3 d-flex justify-content-between">
              <span class="navbar-brand">{ "Task Board" }</span>
              <div class="d-flex gap-3 align-items-center">
                  <button class="btn btn-sm btn-primary" onclick={on_show_add_task}>{ "New task" }</button>
                  <label class="form-check form-switch mb-0">
                      <input class="form-check-input" type="checkbox" checked={theme.is_dark()} onchange={on_theme} />
                      <span class="form-check-label">{ "Dark" }</span>
                  </label>
              </div>
          </nav>
          <main class="container py-3">
              <TaskFormPanel
                  categories={categories.clone()}
                  form={(*draft).clone()}
                  title_ref={title_ref.clone()}
                  on_change={on_draft_change}
                  on_submit={on_submit_create}
                  on_reset={on_reset}
              />
              <div class="d-flex justify-content-between align-items-center my-3 flex-wrap gap-2">
                  <FilterBar
                      categories={categories.clone()}
                      filters={filters}
                      on_category={on_category}
                      on_status={on_status}
                      on_clear_completed={on_clear_completed}
                      on_clear_all={on_clear_all}
                  />
                  <StatsBar stats={rendered.stats} />
              </div>
              <div class="row g-3 tasks-grid">
                  {
                      for rendered.cards.iter().cloned().map(|card| {
                          let key = card.id.to_string();
                          html! {
                              <TaskCardView
                                  key={key}
                                  card={card}
                                  on_edit={on_edit.clone()}
                                  on_toggle={on_toggle.clone()}
                                  on_delete={on_delete.clone()}
                              />
                          }
                      })
                  }
              </div>
          </main>
          {
              if let Some(form) = (*edit_draft).clone() {
                  html! {
                      <EditModal
                          categories={categories}
                          form={form}
                          on_change={on_edit_change}
                          on_submit={on_edit_submit}
                          on_cancel={on_edit_cancel}
                      />
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
