// Wed Aug 19 2026 - Alex
//
// Picks which finalizable candidates get a deep root-path analysis.
// Matching is by type-name suffix, with a short namespace prefix list for
// wrapper families that do not share a common suffix.

/// Well-known OS-handle wrapper type suffixes.
static DEFAULT_HANDLE_SUFFIXES: &[&str] = &[
    "Handle",
    "FileStream",
    "NetworkStream",
    "Socket",
    "Mutex",
    "Semaphore",
    "RegistryKey",
    "Process",
    "Timer",
    "MemoryMappedFile",
    "MemoryMappedViewAccessor",
];

/// Namespaces whose types are handle wrappers regardless of name.
static DEFAULT_HANDLE_PREFIXES: &[&str] = &[
    "Microsoft.Win32.SafeHandles.",
    "System.Net.Sockets.",
    "System.IO.Pipes.",
];

pub struct CandidateClassifier {
    suffixes: Vec<String>,
    prefixes: Vec<String>,
}

impl CandidateClassifier {
    /// Classifier over the built-in wrapper table.
    pub fn new() -> Self {
        Self {
            suffixes: DEFAULT_HANDLE_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            prefixes: DEFAULT_HANDLE_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Classifier over user-supplied suffixes only. The built-in table and
    /// the namespace prefixes are disabled; the user said exactly what
    /// they want.
    pub fn with_suffixes(suffixes: Vec<String>) -> Self {
        Self {
            suffixes,
            prefixes: Vec::new(),
        }
    }

    /// Dispatch on whether the user supplied any `--type-suffix` values.
    pub fn from_user_suffixes(suffixes: &[String]) -> Self {
        if suffixes.is_empty() {
            Self::new()
        } else {
            Self::with_suffixes(suffixes.to_vec())
        }
    }

    pub fn is_handle_type(&self, type_name: &str) -> bool {
        if self
            .suffixes
            .iter()
            .any(|suffix| type_name.ends_with(suffix.as_str()))
        {
            return true;
        }
        self.prefixes
            .iter()
            .any(|prefix| type_name.starts_with(prefix.as_str()))
    }

    pub fn suffix_count(&self) -> usize {
        self.suffixes.len()
    }
}

impl Default for CandidateClassifier {
    fn default() -> Self {
        Self::new()
    }
}
