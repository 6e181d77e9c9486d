/// Reserved squad name for players without a squad affiliation.
pub const NO_SQUAD: &str = "No Squad";

const NO_SQUAD_COLOR: (u8, u8, u8) = (0x44, 0x44, 0x44);

/// Deterministic squad color via CRC32 hash of the squad name.
/// Same name, same color, across calls and sessions. The reserved
/// "No Squad" name maps to a fixed neutral gray instead of a hash.
pub fn squad_color(name: &str) -> (u8, u8, u8) {
    if name == NO_SQUAD {
        return NO_SQUAD_COLOR;
    }
    let hash = crc32fast::hash(name.as_bytes());
    let bytes = hash.to_be_bytes();
    (bytes[0], bytes[1], bytes[2])
}

/// CSS hex form consumed by the timeline and roster views.
pub fn css_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

#[cfg(test)]
mod tests {
    use super::{NO_SQUAD, css_hex, squad_color};

    #[test]
    fn squad_color_is_deterministic() {
        assert_eq!(squad_color("Vympel"), squad_color("Vympel"));
    }

    #[test]
    fn squad_color_varies_for_different_names() {
        assert_ne!(squad_color("Vympel"), squad_color("Alfa"));
    }

    #[test]
    fn no_squad_gets_the_fixed_neutral() {
        assert_eq!(squad_color(NO_SQUAD), (0x44, 0x44, 0x44));
        assert_eq!(css_hex(squad_color(NO_SQUAD)), "#444444");
    }

    #[test]
    fn css_hex_zero_pads() {
        assert_eq!(css_hex((0, 10, 255)), "#000AFF");
    }
}
