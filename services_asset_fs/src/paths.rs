//! Well-known asset locations and legacy path repair

pub const SCRIPTS: &str = "Scripts";
pub const PLAYGROUNDS: &str = "Scripts/Playgrounds";
pub const QUESTS: &str = "Scripts/Quests";
pub const DATA: &str = "Data";
pub const MISC: &str = "Data/Misc";
pub const SYMBOLS: &str = "Data/Symbols";
pub const LANDSCAPE: &str = "Data/Landscape";
pub const TEXTURES: &str = "Data/Textures";
pub const WEATHER_SYSTEM: &str = "Data/WeatherSystem";
pub const CREATURE_MESH: &str = "Data/CreatureMesh";
pub const CITADEL: &str = "Data/Citadel";

/// Every well-known directory, parents before children
pub const ALL: [&str; 11] = [
    SCRIPTS,
    PLAYGROUNDS,
    QUESTS,
    DATA,
    MISC,
    SYMBOLS,
    LANDSCAPE,
    TEXTURES,
    WEATHER_SYSTEM,
    CREATURE_MESH,
    CITADEL,
];

/// Directory markers whose casing differs between game releases
const CASE_FIX_TABLE: [&str; 3] = ["\\Data\\", "\\Landscape\\", "\\Multi_Player\\"];

/// Repairs a path taken from game data files
///
/// The first occurrence of each legacy directory marker is matched
/// ignoring ASCII case and rewritten with its canonical casing. Afterwards
/// every `\` becomes `/`.
///
/// ```
/// use services_asset_fs::fix_path;
///
/// assert_eq!(
///     fix_path("game\\DATA\\landscape\\Land1.lnd"),
///     "game/Data/Landscape/Land1.lnd"
/// );
/// ```
pub fn fix_path(path: &str) -> String {
    let mut result = path.to_string();

    for pattern in CASE_FIX_TABLE {
        if let Some(start) = find_ignore_ascii_case(&result, pattern) {
            result.replace_range(start..start + pattern.len(), pattern);
        }
    }

    result.replace('\\', "/")
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_are_converted() {
        assert_eq!(fix_path("Scripts\\Quests\\intro.txt"), "Scripts/Quests/intro.txt");
        assert_eq!(fix_path("already/fine"), "already/fine");
        assert_eq!(fix_path(""), "");
    }

    #[test]
    fn test_markers_get_canonical_case() {
        assert_eq!(
            fix_path("\\data\\LANDSCAPE\\multi_player\\map.lnd"),
            "/Data/Landscape/Multi_Player/map.lnd"
        );
    }

    #[test]
    fn test_only_first_occurrence_is_fixed() {
        assert_eq!(fix_path("\\DATA\\x\\DATA\\y"), "/Data/x/DATA/y");
    }

    #[test]
    fn test_marker_needs_both_separators() {
        // No leading separator, so "Data" keeps its casing
        assert_eq!(fix_path("DATA\\Textures"), "DATA/Textures");
    }

    #[test]
    fn test_non_ascii_is_preserved() {
        assert_eq!(fix_path("Spiel\\dAtA\\Übung.txt"), "Spiel/Data/Übung.txt");
    }

    #[test]
    fn test_well_known_paths_are_relative() {
        for path in ALL {
            assert!(!path.starts_with('/'));
            assert!(!path.contains('\\'));
        }
        assert!(ALL[..3].iter().all(|p| p.starts_with(SCRIPTS)));
        assert!(ALL[3..].iter().all(|p| p.starts_with(DATA)));
    }
}
