//! Display helpers shared by cards, the detail page and the favorites page.

/// Official artwork for an id, used for evolution stages and missing sprites.
pub fn artwork_url(id: u32) -> String {
    format!(
        "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/{id}.png"
    )
}

/// Shown when a sprite fails to load.
pub const FALLBACK_ARTWORK: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/25.png";

/// Color used for unknown types.
pub const DEFAULT_TYPE_COLOR: &str = "#68A090";

/// `25` → `#025`
pub fn padded_id(id: u32) -> String {
    format!("#{id:03}")
}

/// Decimetres to metres: `7` → `0.7 m`
pub fn format_height(decimetres: u32) -> String {
    format!("{:.1} m", decimetres as f64 / 10.0)
}

/// Hectograms to kilograms: `69` → `6.9 kg`
pub fn format_weight(hectograms: u32) -> String {
    format!("{:.1} kg", hectograms as f64 / 10.0)
}

pub fn stat_label(name: &str) -> String {
    match name {
        "hp" => "HP".to_string(),
        "attack" => "Attack".to_string(),
        "defense" => "Defense".to_string(),
        "special-attack" => "Sp. Attack".to_string(),
        "special-defense" => "Sp. Defense".to_string(),
        "speed" => "Speed".to_string(),
        other => other.to_string(),
    }
}

/// `"solar-power"` → `"solar power"`
pub fn ability_label(name: &str) -> String {
    name.replace('-', " ")
}

/// Width of a stat bar in percent; base stats above 100 fill the bar.
pub fn stat_bar_percent(base_stat: u32) -> u32 {
    base_stat.min(100)
}

pub fn type_color(kind: &str) -> &'static str {
    match kind {
        "normal" => "#A8A878",
        "fire" => "#F08030",
        "water" => "#6890F0",
        "electric" => "#F8D030",
        "grass" => "#78C850",
        "ice" => "#98D8D8",
        "fighting" => "#C03028",
        "poison" => "#A040A0",
        "ground" => "#E0C068",
        "flying" => "#A890F0",
        "psychic" => "#F85888",
        "bug" => "#A8B820",
        "rock" => "#B8A038",
        "ghost" => "#705898",
        "dragon" => "#7038F8",
        "dark" => "#705848",
        "steel" => "#B8B8D0",
        "fairy" => "#EE99AC",
        _ => DEFAULT_TYPE_COLOR,
    }
}

/// `"1 Pokémon favorited"`, `"3 Pokémon favorited"`
pub fn favorites_count_label(count: usize) -> String {
    if count == 1 {
        "1 Pokémon favorited".to_string()
    } else {
        format!("{count} Pokémon favorited")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_id() {
        assert_eq!(padded_id(1), "#001");
        assert_eq!(padded_id(25), "#025");
        assert_eq!(padded_id(151), "#151");
        assert_eq!(padded_id(1025), "#1025");
    }

    #[test]
    fn test_units() {
        assert_eq!(format_height(7), "0.7 m");
        assert_eq!(format_height(20), "2.0 m");
        assert_eq!(format_weight(69), "6.9 kg");
        assert_eq!(format_weight(9050), "905.0 kg");
    }

    #[test]
    fn test_labels() {
        assert_eq!(stat_label("special-attack"), "Sp. Attack");
        assert_eq!(stat_label("accuracy"), "accuracy");
        assert_eq!(ability_label("solar-power"), "solar power");
        assert_eq!(ability_label("shield-dust-x"), "shield dust x");
    }

    #[test]
    fn test_stat_bar_caps_at_full() {
        assert_eq!(stat_bar_percent(45), 45);
        assert_eq!(stat_bar_percent(100), 100);
        assert_eq!(stat_bar_percent(255), 100);
    }

    #[test]
    fn test_type_color() {
        assert_eq!(type_color("fire"), "#F08030");
        assert_eq!(type_color("stellar"), DEFAULT_TYPE_COLOR);
    }

    #[test]
    fn test_artwork_url() {
        assert!(artwork_url(25).ends_with("/official-artwork/25.png"));
        assert_eq!(artwork_url(25), FALLBACK_ARTWORK);
    }

    #[test]
    fn test_favorites_count_label() {
        assert_eq!(favorites_count_label(1), "1 Pokémon favorited");
        assert_eq!(favorites_count_label(0), "0 Pokémon favorited");
        assert_eq!(favorites_count_label(12), "12 Pokémon favorited");
    }
}
