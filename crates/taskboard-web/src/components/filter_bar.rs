use taskboard_core::{
  Categories,
  CategoryFilter,
  Filters,
  StatusFilter
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
pub struct FilterBarProps {
  pub categories:         Categories,
  pub filters:            Filters,
  pub on_category:
    Callback<CategoryFilter>,
  pub on_status:
    Callback<StatusFilter>,
  pub on_clear_completed: Callback<()>,
  pub on_clear_all:       Callback<()>
}

#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  let on_category_change = {
    let on_category =
      props.on_category.clone();
    move |e: web_sys::Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      let Ok(filter) = select
        .value()
        .parse::<CategoryFilter>();
      on_category.emit(filter);
    }
  };

  let status_radio = |status: StatusFilter,
                      label: &str| {
    let on_status =
      props.on_status.clone();
    let checked =
      props.filters.status == status;
    let onchange =
      move |e: web_sys::Event| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        match input
          .value()
          .parse::<StatusFilter>()
        {
          | Ok(status) => {
            on_status.emit(status)
          }
          | Err(error) => {
            tracing::warn!(%error, "ignoring status filter change");
          }
        }
      };
    html! {
        <label class="form-check form-check-inline">
            <input
                class="form-check-input"
                type="radio"
                name="statusFilter"
                value={status.as_str()}
                checked={checked}
                onchange={onchange}
            />
            <span class="form-check-label">{ label.to_string() }</span>
        </label>
    }
  };

  let on_clear_completed = {
    let cb =
      props.on_clear_completed.clone();
    move |_| cb.emit(())
  };
  let on_clear_all = {
    let cb = props.on_clear_all.clone();
    move |_| cb.emit(())
  };

  html! {
      <div class="filters d-flex flex-wrap gap-3 align-items-center">
          <select class="form-select w-auto" onchange={on_category_change}>
              <option value="all" selected={props.filters.category == CategoryFilter::All}>{ "All categories" }</option>
              {
                  for props.categories.iter().map(|category| {
                      let selected = props.filters.category == CategoryFilter::Only(category.clone());
                      html! {
                          <option value={category.to_string()} selected={selected}>{ category.to_string() }</option>
                      }
                  })
              }
          </select>
          <div>
              { status_radio(StatusFilter::All, "All") }
              { status_radio(StatusFilter::Pending, "Pending") }
              { status_radio(StatusFilter::Completed, "Completed") }
          </div>
          <button class="btn btn-outline-secondary btn-sm" onclick={on_clear_completed}>{ "Clear completed" }</button>
          <button class="btn btn-outline-danger btn-sm" onclick={on_clear_all}>{ "Clear all" }</button>
      </div>
  }
}
