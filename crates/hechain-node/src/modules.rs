//! Optional daemon subsystems and the `-M` flag that selects them.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::error::DaemonError;

/// Modules started when `-M` is not given.
pub const DEFAULT_MODULES: &str = "cgtwb";

/// One optional daemon subsystem.
#[derive(Debug, PartialEq, Eq)]
pub struct Module {
    pub identifier: char,
    pub name: &'static str,
    pub description: &'static str,
    /// Identifiers of the modules that must also be enabled.
    pub dependencies: &'static [char],
}

/// Every module this build can run, in start-up order.
pub const MODULES: &[Module] = &[
    Module {
        identifier: 'g',
        name: "gateway",
        description: "Maintains peer to peer connections to the network and lets other \
                      modules perform RPC calls on peers.",
        dependencies: &[],
    },
    Module {
        identifier: 'c',
        name: "consensus",
        description: "Manages everything related to consensus and keeps the blockchain \
                      in sync with the rest of the network.",
        dependencies: &['g'],
    },
    Module {
        identifier: 't',
        name: "transactionpool",
        description: "Manages unconfirmed transactions.",
        dependencies: &['c', 'g'],
    },
    Module {
        identifier: 'w',
        name: "wallet",
        description: "Stores and manages coins and block stakes.",
        dependencies: &['c', 't'],
    },
    Module {
        identifier: 'b',
        name: "blockcreator",
        description: "Takes part in the proof of block stake protocol to create new blocks.",
        dependencies: &['c', 't', 'w'],
    },
    Module {
        identifier: 'e',
        name: "explorer",
        description: "Provides statistics about the blockchain and answers queries about \
                      specific transactions and other objects on the chain.",
        dependencies: &['c'],
    },
];

pub fn module_by_identifier(identifier: char) -> Option<&'static Module> {
    MODULES.iter().find(|m| m.identifier == identifier)
}

// ── ModuleSet ────────────────────────────────────────────────────────────────

/// A dependency-complete selection of modules, kept in start-up order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleSet(Vec<&'static Module>);

impl ModuleSet {
    pub fn contains(&self, identifier: char) -> bool {
        self.0.iter().any(|m| m.identifier == identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Module> + '_ {
        self.0.iter().copied()
    }

    /// Identifiers in start-up order, e.g. `gctwb`.
    pub fn identifiers(&self) -> String {
        self.0.iter().map(|m| m.identifier).collect()
    }
}

impl FromStr for ModuleSet {
    type Err = DaemonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: Vec<char> = s.trim().to_lowercase().chars().collect();
        if let Some(unknown) = wanted.iter().find(|c| module_by_identifier(**c).is_none()) {
            return Err(DaemonError::UnknownModule(*unknown));
        }
        if wanted.is_empty() {
            return Err(DaemonError::NoModules);
        }

        let set: Vec<&'static Module> = MODULES
            .iter()
            .filter(|m| wanted.contains(&m.identifier))
            .collect();

        for module in &set {
            for dep in module.dependencies {
                if !wanted.contains(dep) {
                    let dependency = module_by_identifier(*dep).map(|m| m.name).unwrap_or("?");
                    return Err(DaemonError::MissingModuleDependency {
                        module: module.name,
                        dependency,
                    });
                }
            }
        }
        Ok(ModuleSet(set))
    }
}

impl fmt::Display for ModuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifiers())
    }
}

/// Describe every available module, as printed by `hechaind modules`.
pub fn write_description<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(w, "Modules (select with -M, default {DEFAULT_MODULES}):")?;
    for module in MODULES {
        writeln!(w)?;
        writeln!(w, "  {} ({})", module.name, module.identifier)?;
        writeln!(w, "    {}", module.description)?;
        if !module.dependencies.is_empty() {
            let deps: Vec<&str> = module
                .dependencies
                .iter()
                .filter_map(|d| module_by_identifier(*d).map(|m| m.name))
                .collect();
            writeln!(w, "    requires: {}", deps.join(", "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_is_complete() {
        let set: ModuleSet = DEFAULT_MODULES.parse().unwrap();
        assert_eq!(set.identifiers(), "gctwb");
        assert!(set.contains('b'));
        assert!(!set.contains('e'));
    }

    #[test]
    fn parsing_is_case_insensitive_and_deduplicates() {
        let set: ModuleSet = " GcGe ".parse().unwrap();
        assert_eq!(set.identifiers(), "gce");
    }

    #[test]
    fn rejects_unknown_and_incomplete_sets() {
        assert!(matches!(
            "cgx".parse::<ModuleSet>(),
            Err(DaemonError::UnknownModule('x'))
        ));
        assert!(matches!(
            "cw".parse::<ModuleSet>(),
            Err(DaemonError::MissingModuleDependency { module: "consensus", dependency: "gateway" })
        ));
        assert!(matches!("".parse::<ModuleSet>(), Err(DaemonError::NoModules)));
    }

    #[test]
    fn dependencies_are_known_and_start_earlier() {
        for (i, module) in MODULES.iter().enumerate() {
            for dep in module.dependencies {
                let pos = MODULES.iter().position(|m| m.identifier == *dep);
                assert!(matches!(pos, Some(p) if p < i), "{} -> {}", module.name, dep);
            }
        }
    }

    #[test]
    fn description_lists_every_module() {
        let mut out = Vec::new();
        write_description(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for module in MODULES {
            assert!(text.contains(module.name));
        }
        assert!(text.contains("requires: consensus, transactionpool, wallet"));
    }
}
