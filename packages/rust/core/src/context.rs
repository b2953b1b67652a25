//! Build context: the CI run's metadata as named template fields.
//!
//! Each [`CiFlavor`] maps its own environment variables onto one common set
//! of fields, so a single message template serves every CI system.

use buildnotify_shared::{CiFlavor, EnvSnapshot, LinksConfig};

use crate::template::Fields;

/// Metadata describing a single CI run. Missing variables leave a field empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// CI system the values came from.
    pub flavor: CiFlavor,
    /// Build result, e.g. `success` or `failure`.
    pub status: String,
    /// Repository (`owner/name`) or job name.
    pub title: String,
    /// Build label, e.g. `#42`.
    pub build: String,
    pub build_link: String,
    pub commit_message: String,
    pub commit_link: String,
    pub author: String,
    pub branch: String,
    pub event: String,
    /// Prefix of the per-device test report links, ends with `/`.
    pub test_results_url: String,
    pub nae_host: String,
    pub config_repo_owner: String,
    pub config_repo_name: String,
    pub git_host: String,
}

impl BuildContext {
    /// Build the context for `flavor` from an environment snapshot.
    pub fn from_env(flavor: CiFlavor, env: &EnvSnapshot, links: &LinksConfig) -> Self {
        let base = Self {
            flavor,
            status: String::new(),
            title: String::new(),
            build: String::new(),
            build_link: String::new(),
            commit_message: String::new(),
            commit_link: String::new(),
            author: String::new(),
            branch: String::new(),
            event: String::new(),
            test_results_url: String::new(),
            nae_host: env.get("NAE_HOST").to_string(),
            config_repo_owner: env.get("CONFIG_REPO_OWNER").to_string(),
            config_repo_name: env.get("CONFIG_REPO_NAME").to_string(),
            git_host: links.git_host.clone(),
        };

        match flavor {
            CiFlavor::Drone => drone(base, env, links),
            CiFlavor::Jenkins => jenkins(base, env),
        }
    }
}

fn drone(base: BuildContext, env: &EnvSnapshot, links: &LinksConfig) -> BuildContext {
    let owner = env.get("DRONE_REPO_OWNER");
    let name = env.get("DRONE_REPO_NAME");
    let number = env.get("DRONE_BUILD_NUMBER");
    let author = format!(
        "{} {}",
        env.get("DRONE_COMMIT_AUTHOR_NAME"),
        env.get("DRONE_COMMIT_AUTHOR_EMAIL")
    );

    BuildContext {
        status: env.get("DRONE_BUILD_STATUS").to_string(),
        title: format!("{owner}/{name}"),
        build: format!("#{number}"),
        build_link: env.get("DRONE_BUILD_LINK").to_string(),
        commit_message: env.get("DRONE_COMMIT_MESSAGE").to_string(),
        commit_link: env.get("DRONE_COMMIT_LINK").to_string(),
        author: author.trim().to_string(),
        branch: env.get("DRONE_COMMIT_BRANCH").to_string(),
        event: env.get("DRONE_BUILD_EVENT").to_string(),
        test_results_url: format!(
            "{}/{owner}/{name}/{number}/test_results/",
            links.artifact_base_url.trim_end_matches('/')
        ),
        ..base
    }
}

fn jenkins(base: BuildContext, env: &EnvSnapshot) -> BuildContext {
    BuildContext {
        status: env.get("BUILD_STATUS").to_lowercase(),
        title: job_display_name(env.get("JOB_NAME")).to_string(),
        build: env.get("BUILD_DISPLAY_NAME").to_string(),
        build_link: env.get("RUN_DISPLAY_URL").to_string(),
        commit_message: env.get("GIT_COMMIT_MESSAGE").to_string(),
        commit_link: env.get("GIT_URL").to_string(),
        author: env.get("GIT_COMMIT_AUTHOR").to_string(),
        branch: env.get("GIT_BRANCH").to_string(),
        event: env.get("GIT_EVENT").to_string(),
        test_results_url: format!("{}artifact/test_results/", env.get("BUILD_URL")),
        ..base
    }
}

/// Drop the trailing branch segment of a multibranch job name (`team/job/main` -> `team/job`).
fn job_display_name(job_name: &str) -> &str {
    job_name
        .rsplit_once('/')
        .map_or(job_name, |(parent, _)| parent)
}

impl Fields for BuildContext {
    fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "status" => &self.status,
            "title" => &self.title,
            "build" => &self.build,
            "build_link" => &self.build_link,
            "commit_message" => &self.commit_message,
            "commit_link" => &self.commit_link,
            "author" => &self.author,
            "branch" => &self.branch,
            "event" => &self.event,
            "test_results_url" => &self.test_results_url,
            "nae_host" => &self.nae_host,
            "config_repo_owner" => &self.config_repo_owner,
            "config_repo_name" => &self.config_repo_name,
            "git_host" => &self.git_host,
            _ => return None,
        };
        Some(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drone_env() -> EnvSnapshot {
        [
            ("DRONE_BUILD_STATUS", "success"),
            ("DRONE_REPO_OWNER", "netascode"),
            ("DRONE_REPO_NAME", "aci-config"),
            ("DRONE_BUILD_NUMBER", "128"),
            ("DRONE_BUILD_LINK", "https://drone.example.com/netascode/aci-config/128"),
            ("DRONE_COMMIT_MESSAGE", "Add tenant PROD"),
            ("DRONE_COMMIT_LINK", "https://git.example.com/netascode/aci-config/commit/abc123"),
            ("DRONE_COMMIT_AUTHOR_NAME", "Jo Doe"),
            ("DRONE_COMMIT_AUTHOR_EMAIL", "jo@example.com"),
            ("DRONE_COMMIT_BRANCH", "master"),
            ("DRONE_BUILD_EVENT", "push"),
            ("NAE_HOST", "nae.example.com"),
            ("CONFIG_REPO_OWNER", "netascode"),
            ("CONFIG_REPO_NAME", "aci-state"),
        ]
        .into_iter()
        .collect()
    }

    fn jenkins_env() -> EnvSnapshot {
        [
            ("BUILD_STATUS", "FAILURE"),
            ("JOB_NAME", "aci/aci-config/feature%2Fprod"),
            ("BUILD_DISPLAY_NAME", "#57"),
            ("RUN_DISPLAY_URL", "https://jenkins.example.com/job/aci/57/display/redirect"),
            ("BUILD_URL", "https://jenkins.example.com/job/aci/57/"),
            ("GIT_COMMIT_MESSAGE", "Rename BD"),
            ("GIT_URL", "https://git.example.com/aci/aci-config.git"),
            ("GIT_COMMIT_AUTHOR", "Sam Roe"),
            ("GIT_BRANCH", "feature/prod"),
            ("GIT_EVENT", "pull_request"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn drone_fields() {
        let ctx = BuildContext::from_env(CiFlavor::Drone, &drone_env(), &LinksConfig::default());
        assert_eq!(ctx.status, "success");
        assert_eq!(ctx.title, "netascode/aci-config");
        assert_eq!(ctx.build, "#128");
        assert_eq!(ctx.author, "Jo Doe jo@example.com");
        assert_eq!(ctx.event, "push");
        assert_eq!(ctx.nae_host, "nae.example.com");
        assert_eq!(ctx.config_repo_name, "aci-state");
        assert_eq!(
            ctx.test_results_url,
            "https://engci-maven-master.cisco.com/artifactory/list/AS-release/Community/netascode/aci-config/128/test_results/"
        );
    }

    #[test]
    fn jenkins_fields() {
        let ctx =
            BuildContext::from_env(CiFlavor::Jenkins, &jenkins_env(), &LinksConfig::default());
        assert_eq!(ctx.status, "failure");
        assert_eq!(ctx.title, "aci/aci-config");
        assert_eq!(ctx.build, "#57");
        assert_eq!(ctx.author, "Sam Roe");
        assert_eq!(ctx.branch, "feature/prod");
        assert_eq!(
            ctx.test_results_url,
            "https://jenkins.example.com/job/aci/57/artifact/test_results/"
        );
    }

    #[test]
    fn job_name_without_slash_is_kept() {
        assert_eq!(job_display_name("standalone"), "standalone");
        assert_eq!(job_display_name("a/b/c"), "a/b");
        assert_eq!(job_display_name(""), "");
    }

    #[test]
    fn empty_environment_renders_empty_fields() {
        let env = EnvSnapshot::default();
        let ctx = BuildContext::from_env(CiFlavor::Drone, &env, &LinksConfig::default());
        assert_eq!(ctx.status, "");
        assert_eq!(ctx.title, "/");
        assert_eq!(ctx.build, "#");
        assert_eq!(ctx.author, "");

        let ctx = BuildContext::from_env(CiFlavor::Jenkins, &env, &LinksConfig::default());
        assert_eq!(ctx.status, "");
        assert_eq!(ctx.title, "");
        assert_eq!(ctx.test_results_url, "artifact/test_results/");
    }

    #[test]
    fn custom_links_config() {
        let links = LinksConfig {
            git_host: "github.example.com".into(),
            artifact_base_url: "https://artifacts.example.com/ci/".into(),
        };
        let ctx = BuildContext::from_env(CiFlavor::Drone, &drone_env(), &links);
        assert_eq!(ctx.git_host, "github.example.com");
        assert_eq!(
            ctx.test_results_url,
            "https://artifacts.example.com/ci/netascode/aci-config/128/test_results/"
        );
    }

    #[test]
    fn fields_lookup() {
        let ctx = BuildContext::from_env(CiFlavor::Drone, &drone_env(), &LinksConfig::default());
        assert_eq!(ctx.field("branch"), Some("master"));
        assert_eq!(ctx.field("git_host"), Some("wwwin-github.cisco.com"));
        assert_eq!(ctx.field("nope"), None);
    }
}
