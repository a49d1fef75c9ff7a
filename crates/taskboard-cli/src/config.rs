use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use taskboard_core::Categories;
use taskboard_core::task::DEFAULT_CATEGORIES;
use tracing::{
  debug,
  info,
  trace,
  warn
};

#[derive(Debug, Clone)]
pub struct Config {
  map: HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    let mut map = HashMap::new();
    map.insert(
      "data.location".to_string(),
      "~/.taskboard".to_string()
    );
    map.insert(
      "categories".to_string(),
      DEFAULT_CATEGORIES.join(",")
    );
    map.insert(
      "color".to_string(),
      "on".to_string()
    );

    Self {
      map,
      loaded_files: vec![]
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    let rc = resolve_rc_path(
      rc_override
    )?;
    if let Some(path) = rc {
      info!(rc = %path.display(), "loading config");
      cfg.load_file(&path, &mut vec![])?;
    } else {
      debug!(
        "no config file found; using \
         defaults"
      );
    }

    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn get_bool(
    &self,
    key: &str
  ) -> Option<bool> {
    self
      .map
      .get(key)
      .map(|v| parse_bool(v))
  }

  pub fn categories(
    &self
  ) -> anyhow::Result<Categories> {
    let raw = self
      .get("categories")
      .unwrap_or_default();
    let categories = Categories::new(
      raw.split(',')
    );
    if categories.is_empty() {
      return Err(anyhow!(
        "config key `categories` must \
         name at least one category"
      ));
    }
    Ok(categories)
  }

  #[tracing::instrument(skip(
    self, chain
  ))]
  fn load_file(
    &mut self,
    path: &Path,
    chain: &mut Vec<PathBuf>
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let canonical = path
      .canonicalize()
      .unwrap_or_else(|_| path.clone());
    if chain.contains(&canonical) {
      return Err(anyhow!(
        "include cycle at {}",
        path.display()
      ));
    }
    chain.push(canonical);

    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    self
      .loaded_files
      .push(path.clone());

    let base_dir = path
      .parent()
      .map(|p| p.to_path_buf())
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let mut line = raw_line.trim();
      if let Some((before, _)) =
        line.split_once('#')
      {
        line = before.trim();
      }

      if line.is_empty() {
        continue;
      }

      if let Some(include_rest) =
        line.strip_prefix("include ")
      {
        let include_path =
          resolve_include_path(
            &base_dir,
            include_rest.trim()
          )?;
        debug!(
            file = %path.display(),
            include = %include_path.display(),
            line = line_num + 1,
            "processing include"
        );

        if include_path.exists() {
          self.load_file(
            &include_path,
            chain
          )?;
        } else {
          warn!(include = %include_path.display(), "include file does not exist; skipping");
        }
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {}:{}: {}",
            path.display(),
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = v.trim().to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }

    chain.pop();
    Ok(())
  }
}

#[tracing::instrument(skip(
  cfg,
  override_dir
))]
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = if let Some(path) =
    override_dir
  {
    path.to_path_buf()
  } else if let Some(cfg_value) =
    cfg.get("data.location")
  {
    expand_tilde(Path::new(&cfg_value))
  } else {
    default_data_dir()?
  };

  if !dir.exists() {
    info!(dir = %dir.display(), "creating data directory");
    fs::create_dir_all(&dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          dir.display()
        )
      })?;
  }

  Ok(dir)
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_rc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(rc_env) =
    std::env::var("TASKBOARDRC")
  {
    if rc_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      rc_env
    )));
  }

  let Some(home) = dirs::home_dir()
  else {
    return Ok(None);
  };
  let candidate =
    home.join(".taskboardrc");
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn default_data_dir()
-> anyhow::Result<PathBuf> {
  let home = dirs::home_dir()
    .ok_or_else(|| {
      anyhow!(
        "cannot determine home \
         directory"
      )
    })?;
  Ok(home.join(".taskboard"))
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  if include.trim().is_empty() {
    return Err(anyhow!(
      "include path cannot be empty"
    ));
  }

  let raw = PathBuf::from(include);
  let expanded = expand_tilde(&raw);
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> bool {
  matches!(
    s.trim()
      .to_ascii_lowercase()
      .as_str(),
    "1" | "y" | "yes" | "on" | "true"
  )
}

#[cfg(test)]
mod tests {
  use super::Config;

  #[test]
  fn rc_file_with_include_overrides_defaults()
  {
    let dir = tempfile::tempdir()
      .expect("tempdir");
    let extra = dir.path().join("extra.rc");
    std::fs::write(
      &extra,
      "data.location = /tmp/board\n"
    )
    .expect("write include");
    let main = dir.path().join("main.rc");
    std::fs::write(
      &main,
      "# categories for the home board\n\
       categories = Chores, Garden ,Chores\n\
       color = off # no escapes\n\
       include extra.rc\n"
    )
    .expect("write rc");

    let cfg = Config::load(Some(&main))
      .expect("load config");

    let names: Vec<String> = cfg
      .categories()
      .expect("categories")
      .iter()
      .map(|c| c.to_string())
      .collect();
    assert_eq!(
      names,
      vec!["Chores", "Garden"]
    );
    assert_eq!(
      cfg.get_bool("color"),
      Some(false)
    );
    assert_eq!(
      cfg.get("data.location").as_deref(),
      Some("/tmp/board")
    );
    assert_eq!(cfg.loaded_files.len(), 2);
  }

  #[test]
  fn overrides_strip_rc_prefix() {
    let mut cfg = Config::default();
    cfg.apply_overrides([(
      "rc.categories".to_string(),
      " ".to_string()
    )]);
    assert!(cfg.categories().is_err());
    assert!(
      Config::default()
        .categories()
        .expect("defaults")
        .find("Personal")
        .is_some()
    );
  }

  #[test]
  fn malformed_line_is_rejected() {
    let dir = tempfile::tempdir()
      .expect("tempdir");
    let rc = dir.path().join("bad.rc");
    std::fs::write(&rc, "categories\n")
      .expect("write rc");
    assert!(Config::load(Some(&rc)).is_err());
  }

  #[test]
  fn self_include_is_reported_as_a_cycle()
  {
    let dir = tempfile::tempdir()
      .expect("tempdir");
    let rc = dir.path().join("loop.rc");
    std::fs::write(
      &rc,
      "color = off\ninclude loop.rc\n"
    )
    .expect("write rc");

    let err = Config::load(Some(&rc))
      .expect_err("cycle rejected");
    assert!(
      err
        .to_string()
        .contains("include cycle")
    );
  }

  #[test]
  fn mutual_includes_are_reported_as_a_cycle()
  {
    let dir = tempfile::tempdir()
      .expect("tempdir");
    let a = dir.path().join("a.rc");
    let b = dir.path().join("b.rc");
    std::fs::write(&a, "include b.rc\n")
      .expect("write a");
    std::fs::write(&b, "include a.rc\n")
      .expect("write b");

    assert!(Config::load(Some(&a)).is_err());
  }

  #[test]
  fn shared_include_loads_twice_without_a_cycle()
  {
    let dir = tempfile::tempdir()
      .expect("tempdir");
    let common =
      dir.path().join("common.rc");
    std::fs::write(&common, "color = off\n")
      .expect("write common");
    let main = dir.path().join("main.rc");
    std::fs::write(
      &main,
      "include common.rc\ninclude common.rc\n"
    )
    .expect("write main");

    let cfg = Config::load(Some(&main))
      .expect("load config");
    assert_eq!(cfg.loaded_files.len(), 3);
  }
}
