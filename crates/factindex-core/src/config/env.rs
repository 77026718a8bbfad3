/// Source of raw environment values. Production reads the process
/// environment; tests hand in a map so nothing global is mutated.
pub(super) type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

#[must_use]
pub(super) fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[must_use]
pub(super) fn read_non_empty_env(env: EnvLookup<'_>, name: &str) -> Option<String> {
    env(name)
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[must_use]
pub(super) fn read_env_usize(
    env: EnvLookup<'_>,
    name: &str,
    default_value: usize,
    min_value: usize,
) -> usize {
    env(name)
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|value| *value >= min_value)
        .unwrap_or(default_value)
}

#[must_use]
pub(super) fn read_env_u64(env: EnvLookup<'_>, name: &str) -> Option<u64> {
    env(name).and_then(|raw| raw.trim().parse::<u64>().ok())
}
