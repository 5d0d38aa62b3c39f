//! `.env`-style templates and `Procfile`.

/// Variable names declared in a `.env`-style file, in file order.
///
/// Values are ignored. A leading `export ` is accepted, comments and blank
/// lines are skipped, and a name is kept only once.
pub fn parse_env_keys(content: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, _)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if !key.is_empty() && !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

/// Process declarations from a `Procfile`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Procfile {
    pub processes: Vec<(String, String)>,
}

impl Procfile {
    pub fn parse(content: &str) -> Self {
        let processes = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .filter_map(|l| l.split_once(':'))
            .map(|(name, command)| (name.trim().to_string(), command.trim().to_string()))
            .filter(|(name, command)| !name.is_empty() && !command.is_empty())
            .collect();
        Self { processes }
    }

    pub fn command(&self, process: &str) -> Option<&str> {
        self.processes
            .iter()
            .find(|(name, _)| name == process)
            .map(|(_, command)| command.as_str())
    }

    pub fn web(&self) -> Option<&str> {
        self.command("web")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_keys_in_file_order() {
        let keys = parse_env_keys("DATABASE_URL=\nSECRET_KEY=changeme\nAPI_URL=http://x\n");
        assert_eq!(keys, vec!["DATABASE_URL", "SECRET_KEY", "API_URL"]);
    }

    #[test]
    fn test_env_keys_skip_comments_and_export() {
        let keys = parse_env_keys(
            "# database\nexport DATABASE_URL=postgres://\n\n  REDIS_URL = redis://\nnot a pair\n=orphan\nDATABASE_URL=dup\n",
        );
        assert_eq!(keys, vec!["DATABASE_URL", "REDIS_URL"]);
    }

    #[test]
    fn test_procfile_web() {
        let procfile = Procfile::parse("web: npm start\nworker: node worker.js\n");
        assert_eq!(procfile.web(), Some("npm start"));
        assert_eq!(procfile.command("worker"), Some("node worker.js"));
    }

    #[test]
    fn test_procfile_without_web() {
        let procfile = Procfile::parse("# only a worker\nworker: bundle exec sidekiq\n");
        assert_eq!(procfile.web(), None);
    }

    #[test]
    fn test_procfile_command_keeps_colons() {
        let procfile = Procfile::parse("web: gunicorn app:server --bind 0.0.0.0:$PORT\n");
        assert_eq!(procfile.web(), Some("gunicorn app:server --bind 0.0.0.0:$PORT"));
    }
}
