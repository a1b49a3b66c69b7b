use crate::error::ProbeError;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};

/// Lists the names of running processes, lowercased
pub trait ProcessLister: Send + Sync {
    fn process_names(&self) -> Result<Vec<String>, ProbeError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoProcessLister;

impl SysinfoProcessLister {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessLister for SysinfoProcessLister {
    fn process_names(&self) -> Result<Vec<String>, ProbeError> {
        let own_pid = sysinfo::get_current_pid()
            .map_err(|e| ProbeError::Unavailable(format!("current pid unknown: {}", e)))?;

        let mut system =
            System::new_with_specifics(RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing()));
        system.refresh_processes(ProcessesToUpdate::All, true);

        let entries = system
            .processes()
            .iter()
            // threads of this server show up as tasks on Linux
            .filter(|(_, process)| process.thread_kind().is_none())
            .map(|(pid, process)| (pid.as_u32(), process.name().to_string_lossy().to_lowercase()));

        other_process_names(entries, own_pid.as_u32())
    }
}

/// Names of every listed process except `own_pid`.
///
/// With `/proc` mounted `hidepid` or inside a sandbox the table holds only
/// the calling process. Nothing else visible is reported as unavailable,
/// never as a clean host.
pub fn other_process_names(
    entries: impl IntoIterator<Item = (u32, String)>,
    own_pid: u32,
) -> Result<Vec<String>, ProbeError> {
    let names: Vec<String> = entries
        .into_iter()
        .filter(|(pid, _)| *pid != own_pid)
        .map(|(_, name)| name)
        .collect();

    if names.is_empty() {
        return Err(ProbeError::Unavailable(
            "no processes visible besides this one".to_string(),
        ));
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_lowercase_names() {
        // sandboxed CI may hide every other process
        match SysinfoProcessLister::new().process_names() {
            Ok(names) => assert!(names.iter().all(|name| *name == name.to_lowercase())),
            Err(e) => assert!(matches!(e, ProbeError::Unavailable(_))),
        }
    }

    #[test]
    fn test_own_process_is_excluded() {
        let entries = vec![
            (1, "systemd".to_string()),
            (4242, "trust_api_server".to_string()),
            (5000, "steam".to_string()),
        ];
        let names = other_process_names(entries, 4242).unwrap();
        assert_eq!(names, vec!["systemd".to_string(), "steam".to_string()]);
    }

    #[test]
    fn test_only_self_visible_is_unavailable() {
        let entries = vec![(4242, "trust_api_server".to_string())];
        let result = other_process_names(entries, 4242);
        assert!(matches!(result, Err(ProbeError::Unavailable(_))));

        assert!(other_process_names(Vec::new(), 4242).is_err());
    }
}
