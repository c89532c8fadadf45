use std::path::{Path, PathBuf};

/// The project being scaffolded and the import paths derived from its template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub repo_url: String,
    pub target_dir: PathBuf,
    pub old_import: String,
    pub new_import: String,
}

impl Project {
    pub fn new(repo_url: impl Into<String>, name: impl Into<String>, dir: impl AsRef<Path>) -> Self {
        let repo_url = repo_url.into();
        let name = name.into();
        let old_import = import_path(&repo_url);
        let new_import = rename_import(&old_import, &name);
        let target_dir = dir.as_ref().join(&name);
        Self {
            name,
            repo_url,
            target_dir,
            old_import,
            new_import,
        }
    }
}

/// Module path of a repository: the URL without its scheme, trailing slash or `.git` suffix.
pub fn import_path(repo_url: &str) -> String {
    let path = repo_url
        .split_once("://")
        .map_or(repo_url, |(_, rest)| rest)
        .trim_end_matches('/');
    path.strip_suffix(".git").unwrap_or(path).to_string()
}

/// Replaces the last segment of `import` (the template's name) with `name`.
pub fn rename_import(import: &str, name: &str) -> String {
    match import.rsplit_once('/') {
        Some((base, _)) => format!("{base}/{name}"),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_paths_from_template_url() {
        let project = Project::new("https://example.com/org/boilerplate", "acme-service", "/tmp/");
        assert_eq!(project.target_dir, PathBuf::from("/tmp/acme-service"));
        assert_eq!(project.old_import, "example.com/org/boilerplate");
        assert_eq!(project.new_import, "example.com/org/acme-service");
    }

    #[test]
    fn relative_base_directory() {
        let project = Project::new("https://github.com/ravilushqa/boilerplate", "new-project", "./");
        assert_eq!(project.target_dir, Path::new("./").join("new-project"));
        assert_eq!(project.new_import, "github.com/ravilushqa/new-project");
    }

    #[test]
    fn strips_git_suffix_and_trailing_slash() {
        assert_eq!(import_path("https://example.com/org/tmpl.git"), "example.com/org/tmpl");
        assert_eq!(import_path("http://example.com/org/tmpl/"), "example.com/org/tmpl");
        assert_eq!(import_path("example.com/org/tmpl"), "example.com/org/tmpl");
    }

    #[test]
    fn only_the_last_segment_is_renamed() {
        assert_eq!(
            rename_import("example.com/boilerplate/boilerplate", "svc"),
            "example.com/boilerplate/svc"
        );
        assert_eq!(rename_import("boilerplate", "svc"), "svc");
    }
}
