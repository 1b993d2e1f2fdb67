//! Built-in 2025 calendar.
//!
//! Zone distances are metres from the start line, ideal speeds km/h and
//! reference laps are recent pole times in seconds.

use uom::si::{
    f64::{Length, Time, Velocity},
    length::meter,
    time::second,
    velocity::kilometer_per_hour,
};

use super::track::{
    CornerClass::{self, Fast, Medium, Slow},
    CornerZone,
    DownforceLevel::{self, High, Low, MediumHigh, VeryHigh, VeryLow},
    Track,
};

type ZoneRow = (f64, f64, CornerClass, f64, &'static str);

struct TrackRow {
    id: &'static str,
    name: &'static str,
    length: f64,
    level: DownforceLevel,
    reference_lap: f64,
    zones: &'static [ZoneRow],
}

impl TrackRow {
    fn build(&self) -> Track {
        let zones = self
            .zones
            .iter()
            .zip(1..)
            .map(|(&(start, end, class, ideal, label), number)| {
                CornerZone::new(
                    number,
                    Length::new::<meter>(start),
                    Length::new::<meter>(end),
                    class,
                    label,
                    Velocity::new::<kilometer_per_hour>(ideal),
                )
            })
            .collect();

        Track::new(
            self.id,
            self.name,
            Length::new::<meter>(self.length),
            self.level,
            zones,
        )
        .with_reference_lap(Time::new::<second>(self.reference_lap))
    }
}

pub(super) fn tracks() -> Vec<Track> {
    TRACKS.iter().map(TrackRow::build).collect()
}

const MEDIUM: DownforceLevel = DownforceLevel::Medium;

const TRACKS: &[TrackRow] = &[
    TrackRow {
        id: "monza",
        name: "Monza",
        length: 5793.0,
        level: VeryLow,
        reference_lap: 79.327,
        zones: &[
            (500.0, 650.0, Slow, 145.0, "Variante del Rettifilo"),
            (650.0, 750.0, Slow, 148.0, "Variante del Rettifilo"),
            (1200.0, 1350.0, Medium, 215.0, "Curva Biassono"),
            (1850.0, 1950.0, Slow, 150.0, "Variante della Roggia"),
            (1950.0, 2050.0, Slow, 152.0, "Variante della Roggia"),
            (2400.0, 2550.0, Fast, 315.0, "Lesmo 1"),
            (2700.0, 2850.0, Fast, 320.0, "Lesmo 2"),
            (3350.0, 3450.0, Medium, 218.0, "Variante Ascari"),
            (3450.0, 3550.0, Medium, 220.0, "Variante Ascari"),
            (3550.0, 3650.0, Medium, 222.0, "Variante Ascari"),
            (4200.0, 4500.0, Fast, 325.0, "Parabolica"),
        ],
    },
    TrackRow {
        id: "silverstone",
        name: "Silverstone",
        length: 5891.0,
        level: MediumHigh,
        reference_lap: 85.819,
        zones: &[
            (350.0, 500.0, Fast, 310.0, "Abbey"),
            (750.0, 900.0, Fast, 315.0, "Farm Curve"),
            (1150.0, 1300.0, Medium, 218.0, "Village"),
            (1600.0, 1750.0, Slow, 142.0, "The Loop"),
            (2100.0, 2250.0, Medium, 225.0, "Aintree"),
            (2500.0, 2650.0, Slow, 145.0, "Brooklands"),
            (2850.0, 3000.0, Slow, 148.0, "Luffield"),
            (3450.0, 3650.0, Fast, 320.0, "Copse"),
            (3950.0, 4150.0, Fast, 318.0, "Maggotts"),
            (4200.0, 4400.0, Fast, 315.0, "Becketts"),
            (4450.0, 4600.0, Fast, 312.0, "Chapel"),
            (4950.0, 5100.0, Medium, 220.0, "Stowe"),
        ],
    },
    TrackRow {
        id: "monaco",
        name: "Monaco",
        length: 3337.0,
        level: VeryHigh,
        reference_lap: 70.270,
        zones: &[
            (180.0, 280.0, Slow, 140.0, "Sainte Devote"),
            (450.0, 550.0, Slow, 145.0, "Massenet"),
            (600.0, 700.0, Slow, 142.0, "Casino"),
            (850.0, 950.0, Slow, 138.0, "Mirabeau"),
            (1050.0, 1180.0, Slow, 135.0, "Grand Hotel"),
            (1380.0, 1480.0, Medium, 210.0, "Portier"),
            (1650.0, 1900.0, Fast, 305.0, "Tunnel Exit"),
            (2150.0, 2250.0, Slow, 148.0, "Nouvelle Chicane"),
            (2250.0, 2350.0, Slow, 150.0, "Nouvelle Chicane"),
            (2500.0, 2600.0, Medium, 215.0, "Tabac"),
            (2750.0, 2850.0, Medium, 212.0, "Swimming Pool"),
            (2850.0, 2950.0, Medium, 214.0, "Swimming Pool"),
            (3100.0, 3200.0, Slow, 143.0, "La Rascasse"),
        ],
    },
    TrackRow {
        id: "spa",
        name: "Spa",
        length: 7004.0,
        level: MEDIUM,
        reference_lap: 113.159,
        zones: &[
            (300.0, 450.0, Slow, 148.0, "La Source"),
            (850.0, 1100.0, Fast, 320.0, "Eau Rouge"),
            (1100.0, 1300.0, Fast, 325.0, "Raidillon"),
            (2100.0, 2250.0, Medium, 220.0, "Les Combes"),
            (2250.0, 2400.0, Medium, 218.0, "Les Combes"),
            (2850.0, 3000.0, Slow, 152.0, "Rivage"),
            (3400.0, 3650.0, Fast, 318.0, "Pouhon"),
            (4100.0, 4300.0, Fast, 315.0, "Campus"),
            (4900.0, 5100.0, Fast, 312.0, "Stavelot"),
            (5650.0, 5900.0, Fast, 322.0, "Blanchimont"),
            (6450.0, 6580.0, Slow, 145.0, "Bus Stop"),
            (6580.0, 6700.0, Slow, 150.0, "Bus Stop"),
        ],
    },
    TrackRow {
        id: "hungary",
        name: "Hungary",
        length: 4381.0,
        level: High,
        reference_lap: 75.227,
        zones: &[
            (250.0, 400.0, Medium, 215.0, "Turn 1"),
            (550.0, 680.0, Slow, 145.0, "Turn 2"),
            (850.0, 980.0, Slow, 142.0, "Turn 3"),
            (1150.0, 1280.0, Slow, 148.0, "Turn 4"),
            (1450.0, 1580.0, Slow, 150.0, "Turn 5"),
            (1750.0, 1900.0, Medium, 218.0, "Turn 6"),
            (2050.0, 2200.0, Medium, 220.0, "Turn 7"),
            (2400.0, 2530.0, Slow, 143.0, "Turn 8"),
            (2700.0, 2850.0, Medium, 222.0, "Turn 9"),
            (3000.0, 3150.0, Medium, 225.0, "Turn 10"),
            (3350.0, 3480.0, Slow, 147.0, "Turn 11"),
            (3650.0, 3850.0, Fast, 310.0, "Turn 12"),
            (4000.0, 4150.0, Medium, 218.0, "Turn 13"),
            (4250.0, 4350.0, Slow, 145.0, "Turn 14"),
        ],
    },
    TrackRow {
        id: "suzuka",
        name: "Suzuka",
        length: 5807.0,
        level: MediumHigh,
        reference_lap: 88.197,
        zones: &[
            (350.0, 550.0, Fast, 315.0, "Turn 1"),
            (700.0, 900.0, Fast, 318.0, "Turn 2"),
            (1150.0, 1300.0, Medium, 220.0, "S Curves"),
            (1300.0, 1450.0, Medium, 218.0, "S Curves"),
            (1450.0, 1600.0, Medium, 222.0, "S Curves"),
            (1900.0, 2100.0, Fast, 312.0, "Dunlop"),
            (2350.0, 2500.0, Medium, 215.0, "Degner 1"),
            (2600.0, 2800.0, Fast, 310.0, "Degner 2"),
            (3150.0, 3350.0, Slow, 140.0, "Hairpin"),
            (3750.0, 4050.0, Fast, 320.0, "Spoon"),
            (4800.0, 5100.0, Fast, 325.0, "130R"),
            (5450.0, 5580.0, Slow, 148.0, "Casio Triangle"),
            (5580.0, 5700.0, Slow, 152.0, "Casio Triangle"),
        ],
    },
    TrackRow {
        id: "bahrain",
        name: "Bahrain",
        length: 5412.0,
        level: MEDIUM,
        reference_lap: 89.179,
        zones: &[
            (300.0, 450.0, Medium, 215.0, "Turn 1"),
            (850.0, 1000.0, Slow, 148.0, "Turn 2"),
            (1200.0, 1350.0, Slow, 145.0, "Turn 3"),
            (1650.0, 1800.0, Medium, 220.0, "Turn 4"),
            (2350.0, 2550.0, Fast, 318.0, "Turn 5-6"),
            (3100.0, 3250.0, Medium, 218.0, "Turn 8"),
            (3750.0, 3900.0, Slow, 142.0, "Turn 10"),
            (4450.0, 4650.0, Medium, 222.0, "Turn 11-12"),
            (5050.0, 5250.0, Slow, 150.0, "Turn 13-14"),
        ],
    },
    TrackRow {
        id: "saudi_arabia",
        name: "Saudi Arabia",
        length: 6174.0,
        level: MEDIUM,
        reference_lap: 87.472,
        zones: &[
            (400.0, 600.0, Fast, 320.0, "Turn 1"),
            (1100.0, 1300.0, Fast, 315.0, "Turn 4-5"),
            (2200.0, 2400.0, Medium, 220.0, "Turn 10-11"),
            (3350.0, 3550.0, Fast, 325.0, "Turn 13"),
            (4200.0, 4400.0, Slow, 145.0, "Turn 17"),
            (5100.0, 5300.0, Medium, 218.0, "Turn 22-23"),
            (5850.0, 6050.0, Fast, 312.0, "Turn 26-27"),
        ],
    },
    TrackRow {
        id: "australia",
        name: "Australia",
        length: 5278.0,
        level: MediumHigh,
        reference_lap: 75.915,
        zones: &[
            (350.0, 500.0, Medium, 218.0, "Turn 1"),
            (850.0, 1000.0, Medium, 215.0, "Turn 3"),
            (1450.0, 1600.0, Slow, 148.0, "Turn 6"),
            (2150.0, 2350.0, Fast, 315.0, "Turn 9-10"),
            (2900.0, 3050.0, Slow, 142.0, "Turn 11-12"),
            (3650.0, 3850.0, Medium, 222.0, "Turn 13"),
            (4450.0, 4650.0, Fast, 318.0, "Turn 15"),
        ],
    },
    TrackRow {
        id: "miami",
        name: "Miami",
        length: 5410.0,
        level: MEDIUM,
        reference_lap: 87.241,
        zones: &[
            (400.0, 550.0, Slow, 150.0, "Turn 1"),
            (1100.0, 1300.0, Medium, 220.0, "Turn 5-7"),
            (2200.0, 2400.0, Slow, 145.0, "Turn 11"),
            (3100.0, 3300.0, Medium, 215.0, "Turn 13-14"),
            (4050.0, 4250.0, Fast, 312.0, "Turn 16-17"),
        ],
    },
    TrackRow {
        id: "imola",
        name: "Imola",
        length: 4909.0,
        level: MediumHigh,
        reference_lap: 74.746,
        zones: &[
            (300.0, 450.0, Slow, 148.0, "Tamburello"),
            (950.0, 1100.0, Fast, 315.0, "Villeneuve"),
            (1650.0, 1800.0, Slow, 142.0, "Tosa"),
            (2450.0, 2650.0, Medium, 220.0, "Piratella"),
            (3250.0, 3450.0, Fast, 318.0, "Acque Minerali"),
            (4150.0, 4350.0, Slow, 150.0, "Variante Alta"),
        ],
    },
    TrackRow {
        id: "barcelona",
        name: "Barcelona",
        length: 4675.0,
        level: MediumHigh,
        reference_lap: 71.403,
        zones: &[
            (300.0, 450.0, Slow, 145.0, "Turn 1"),
            (850.0, 1000.0, Fast, 315.0, "Turn 3"),
            (1550.0, 1750.0, Medium, 222.0, "Turn 5-6"),
            (2350.0, 2500.0, Fast, 320.0, "Turn 9"),
            (3150.0, 3300.0, Slow, 148.0, "Turn 10"),
            (3950.0, 4150.0, Medium, 218.0, "Turn 12-13"),
        ],
    },
    TrackRow {
        id: "china",
        name: "China",
        length: 5451.0,
        level: MEDIUM,
        reference_lap: 93.660,
        zones: &[
            (350.0, 500.0, Slow, 148.0, "Turn 1"),
            (1100.0, 1400.0, Fast, 318.0, "Turn 3-4"),
            (2150.0, 2300.0, Medium, 220.0, "Turn 6"),
            (3100.0, 3250.0, Slow, 145.0, "Turn 8"),
            (4050.0, 4250.0, Medium, 215.0, "Turn 11-12"),
            (4950.0, 5150.0, Fast, 312.0, "Turn 13-14"),
        ],
    },
    TrackRow {
        id: "azerbaijan",
        name: "Azerbaijan",
        length: 6003.0,
        level: MEDIUM,
        reference_lap: 100.445,
        zones: &[
            (400.0, 550.0, Slow, 142.0, "Turn 1-2"),
            (1200.0, 1350.0, Slow, 148.0, "Turn 3"),
            (2100.0, 2250.0, Medium, 218.0, "Turn 7-8"),
            (3200.0, 3400.0, Slow, 145.0, "Turn 15-16"),
            (4300.0, 4500.0, Fast, 328.0, "Turn 20"),
            (5450.0, 5800.0, Fast, 330.0, "Main Straight Kink"),
        ],
    },
    TrackRow {
        id: "usa",
        name: "USA",
        length: 5513.0,
        level: MediumHigh,
        reference_lap: 92.312,
        zones: &[
            (350.0, 550.0, Slow, 150.0, "Turn 1"),
            (1150.0, 1350.0, Medium, 220.0, "Turn 3-6"),
            (2200.0, 2400.0, Fast, 318.0, "Turn 9"),
            (3150.0, 3300.0, Slow, 142.0, "Turn 11"),
            (4100.0, 4300.0, Medium, 222.0, "Turn 16-18"),
            (5050.0, 5300.0, Fast, 315.0, "Turn 19"),
        ],
    },
    TrackRow {
        id: "mexico",
        name: "Mexico",
        length: 4304.0,
        level: MediumHigh,
        reference_lap: 75.946,
        zones: &[
            (300.0, 450.0, Slow, 145.0, "Turn 1"),
            (950.0, 1100.0, Medium, 218.0, "Turn 3-4"),
            (1650.0, 1850.0, Fast, 315.0, "Turn 6-7"),
            (2450.0, 2600.0, Slow, 148.0, "Turn 8-9"),
            (3250.0, 3450.0, Medium, 220.0, "Turn 12"),
            (3950.0, 4150.0, Fast, 312.0, "Turn 16-17"),
        ],
    },
    TrackRow {
        id: "austria",
        name: "Austria",
        length: 4318.0,
        level: Low,
        reference_lap: 64.314,
        zones: &[
            (300.0, 450.0, Medium, 220.0, "Turn 1"),
            (1050.0, 1200.0, Slow, 150.0, "Turn 3"),
            (1850.0, 2050.0, Fast, 325.0, "Turn 4-5"),
            (2750.0, 2900.0, Medium, 215.0, "Turn 7"),
            (3550.0, 3750.0, Fast, 318.0, "Turn 9-10"),
        ],
    },
    TrackRow {
        id: "canada",
        name: "Canada",
        length: 4361.0,
        level: Low,
        reference_lap: 72.000,
        zones: &[
            (300.0, 450.0, Slow, 145.0, "Turn 1-2"),
            (1100.0, 1250.0, Slow, 148.0, "Turn 3-4"),
            (1950.0, 2100.0, Slow, 142.0, "Turn 6-7"),
            (2750.0, 2900.0, Slow, 150.0, "Turn 8-9"),
            (3550.0, 3700.0, Slow, 145.0, "Turn 10"),
            (4050.0, 4200.0, Medium, 215.0, "Turn 13-14"),
        ],
    },
    TrackRow {
        id: "singapore",
        name: "Singapore",
        length: 4940.0,
        level: VeryHigh,
        reference_lap: 89.525,
        zones: &[
            (300.0, 450.0, Slow, 142.0, "Turn 1-2"),
            (1050.0, 1200.0, Slow, 145.0, "Turn 5"),
            (1850.0, 2000.0, Medium, 215.0, "Turn 7-8"),
            (2650.0, 2800.0, Slow, 148.0, "Turn 10"),
            (3450.0, 3600.0, Medium, 220.0, "Turn 14"),
            (4250.0, 4400.0, Slow, 140.0, "Turn 18-19"),
        ],
    },
    TrackRow {
        id: "zandvoort",
        name: "Zandvoort",
        length: 4259.0,
        level: High,
        reference_lap: 69.673,
        zones: &[
            (300.0, 450.0, Medium, 218.0, "Turn 1"),
            (950.0, 1100.0, Slow, 148.0, "Turn 3"),
            (1650.0, 1850.0, Fast, 315.0, "Hugenholtz"),
            (2450.0, 2600.0, Medium, 220.0, "Turn 9"),
            (3250.0, 3400.0, Fast, 312.0, "Turn 11-12"),
            (3950.0, 4100.0, Slow, 145.0, "Turn 14"),
        ],
    },
    TrackRow {
        id: "las_vegas",
        name: "Las Vegas",
        length: 6120.0,
        level: Low,
        reference_lap: 92.312,
        zones: &[
            (450.0, 600.0, Slow, 150.0, "Turn 1-2"),
            (2200.0, 2350.0, Slow, 148.0, "Turn 5-6"),
            (3850.0, 4000.0, Slow, 145.0, "Turn 9-10"),
            (5450.0, 5600.0, Medium, 218.0, "Turn 14"),
        ],
    },
    TrackRow {
        id: "brazil",
        name: "Brazil",
        length: 4309.0,
        level: MediumHigh,
        reference_lap: 70.087,
        zones: &[
            (300.0, 450.0, Slow, 145.0, "Senna S"),
            (850.0, 1000.0, Slow, 148.0, "Senna S"),
            (1550.0, 1700.0, Medium, 220.0, "Turn 4"),
            (2250.0, 2400.0, Fast, 315.0, "Turn 6-7"),
            (2950.0, 3100.0, Slow, 142.0, "Turn 8"),
            (3650.0, 3850.0, Fast, 318.0, "Turn 12"),
        ],
    },
    TrackRow {
        id: "qatar",
        name: "Qatar",
        length: 5380.0,
        level: MEDIUM,
        reference_lap: 80.520,
        zones: &[
            (400.0, 550.0, Medium, 220.0, "Turn 1"),
            (1200.0, 1400.0, Fast, 318.0, "Turn 4-5"),
            (2100.0, 2250.0, Medium, 215.0, "Turn 6"),
            (3050.0, 3250.0, Fast, 315.0, "Turn 12-13"),
            (4150.0, 4300.0, Slow, 148.0, "Turn 14"),
            (4950.0, 5150.0, Medium, 222.0, "Turn 16"),
        ],
    },
    TrackRow {
        id: "abu_dhabi",
        name: "Abu Dhabi",
        length: 5281.0,
        level: MediumHigh,
        reference_lap: 82.595,
        zones: &[
            (350.0, 500.0, Medium, 218.0, "Turn 1"),
            (1100.0, 1250.0, Slow, 145.0, "Turn 5-6"),
            (1900.0, 2100.0, Fast, 315.0, "Turn 8-9"),
            (2750.0, 2900.0, Slow, 148.0, "Turn 11"),
            (3600.0, 3800.0, Medium, 220.0, "Turn 14-15"),
            (4450.0, 4650.0, Fast, 312.0, "Turn 17-18"),
        ],
    },
];
