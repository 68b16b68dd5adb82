use derive_more::Display;

/// Plate denominations in kg, largest first.
pub const DENOMINATIONS: [f32; 7] = [25.0, 20.0, 15.0, 10.0, 5.0, 2.5, 1.25];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plate {
    pub weight: f32,
    pub color: PlateColor,
}

impl Plate {
    #[must_use]
    pub fn new(weight: f32) -> Self {
        Self {
            weight,
            color: PlateColor::from(weight),
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum PlateColor {
    #[display("red")]
    Red,
    #[display("blue")]
    Blue,
    #[display("yellow")]
    Yellow,
    #[display("green")]
    Green,
    #[display("white")]
    White,
    #[display("gray")]
    Gray,
    #[display("light gray")]
    LightGray,
}

impl From<f32> for PlateColor {
    fn from(weight: f32) -> Self {
        if weight >= 25.0 {
            PlateColor::Red
        } else if weight >= 20.0 {
            PlateColor::Blue
        } else if weight >= 15.0 {
            PlateColor::Yellow
        } else if weight >= 10.0 {
            PlateColor::Green
        } else if weight >= 5.0 {
            PlateColor::White
        } else if weight >= 2.5 {
            PlateColor::Gray
        } else {
            PlateColor::LightGray
        }
    }
}

/// Plates to load on one side of the bar to reach the target weight.
///
/// The largest fitting plate is taken first. Any remainder below the smallest denomination is
/// dropped, and a target not exceeding the bar weight results in no plates.
#[must_use]
pub fn decompose_plates(target_weight: f32, bar_weight: f32) -> Vec<Plate> {
    let mut plates = vec![];

    if target_weight <= bar_weight {
        return plates;
    }

    let mut remaining = (target_weight - bar_weight) / 2.0;

    for denomination in DENOMINATIONS {
        while remaining >= denomination {
            plates.push(Plate::new(denomination));
            remaining -= denomination;
        }
    }

    plates
}

/// Weight of the given plates on one side.
#[must_use]
fn total_weight(plates: &[Plate]) -> f32 {
    plates.iter().map(|p| p.weight).sum()
}

/// Weight of the bar loaded with the given plates on both sides.
#[must_use]
pub fn loaded_weight(bar_weight: f32, plates: &[Plate]) -> f32 {
    bar_weight + 2.0 * total_weight(plates)
}
