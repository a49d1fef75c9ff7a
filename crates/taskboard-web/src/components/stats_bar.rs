use taskboard_core::Stats;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatsBarProps {
  pub stats: Stats
}

#[function_component(StatsBar)]
pub fn stats_bar(
  props: &StatsBarProps
) -> Html {
  html! {
      <div class="stats d-flex gap-2">
          <span class="badge bg-primary">{ format!("Total {}", props.stats.total) }</span>
          <span class="badge bg-warning">{ format!("Pending {}", props.stats.pending) }</span>
          <span class="badge bg-success">{ format!("Completed {}", props.stats.completed) }</span>
      </div>
  }
}
