// Shared on-disk fixture for the integration tests.
#![allow(dead_code)]

use gender_core::core::data::CountrySource;
use gender_core::core::dictionary::COUNTRY_COLUMNS;
use gender_core::DataConfig;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub struct Fixture {
    pub dir: TempDir,
    pub config: DataConfig,
}

/// Frequency vector with the given `(country, digit)` cells set.
pub fn vector(cells: &[(&str, char)]) -> String {
    let mut v = vec![' '; COUNTRY_COLUMNS.len()];
    for &(country, digit) in cells {
        let col = COUNTRY_COLUMNS.iter().position(|&c| c == country).unwrap();
        v[col] = digit;
    }
    v.into_iter().collect()
}

fn write(dir: &Path, file: &str, content: &str) {
    fs::write(dir.join(file), content).unwrap();
}

impl Fixture {
    /// A small but complete data directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        write(root, "RussiaMaleUTF8.csv", "Иван,200\nАлександр,150\nСаша,10\n");
        write(root, "RussiaFemaleUTF8.csv", "Мария,120\nАнна,90\nСаша,8\n");
        write(root, "RomaniaMaleUTF8.csv", "Bogdan,300\nAndrei,250\nMihai,220\n");
        write(root, "RomaniaFemaleUTF8.csv", "Ioana,280\nMaria,260\n");
        write(root, "USAMaleUTF8.csv", "John,5000\nRobert,4000\nKim\nAndrea,40\n");
        write(root, "USAFemaleUTF8.csv", "Mary,4500\nKim\nkim\nAndrea,900\n");
        write(root, "ItalyMaleUTF8.csv", "Andrea,1000\nNicola,600\n");
        write(root, "ItalyFemaleUTF8.csv", "Giulia,800\nAndrea,30\nNicola,400\n");
        write(root, "SpainMaleUTF8.csv", "José,5\nJavier,70\n");
        write(root, "SpainFemaleUTF8.csv", "Lucía,60\n");
        write(root, "GreeceMaleUTF8.csv", "Γιώργος,80\n");
        write(root, "GreeceFemaleUTF8.csv", "Ελένη,75\n");
        write(root, "FrisiaMaleUTF8.csv", "Sjoerd\nWiebe\n");
        write(root, "FrisiaFemaleUTF8.csv", "Sjoukje\nWiebe\n");

        write(root, "diminutives.csv", "robert,bob,bobby,rob\nmary,molly\nмария,маша\n");
        write(
            root,
            "countryStats.csv",
            "USA,5000\nItaly,1000\nRomania,500\nRussia,1500\nSpain,800\nGreece,200\n",
        );

        let dictionary = serde_json::json!({
            "hiroshi": [["M", vector(&[("Japan", 'c')])]],
            "taro": [["M", "f".repeat(55)]],
            "sasha": [
                ["?M", vector(&[("Russia", '5')])],
                ["?F", vector(&[("Russia", '4')])]
            ],
            "chen": [["?", vector(&[("China", '9')])]]
        });
        write(root, "gender.dict", &dictionary.to_string());

        let mut config = DataConfig::with_data_dir(root);
        config.countries = [
            ("Russia", "Russia"),
            ("Romania", "Romania"),
            ("USA", "USA"),
            ("Italy", "Italy"),
            ("Spain", "Spain"),
            ("Greece", "Greece"),
            ("The Netherlands", "Frisia"),
        ]
        .iter()
        .map(|&(country, file_stem)| CountrySource {
            country: country.to_string(),
            file_stem: file_stem.to_string(),
        })
        .collect();

        Self { dir, config }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Replaces one source file.
    pub fn overwrite(&self, file: &str, content: &str) {
        write(self.path(), file, content);
    }
}
