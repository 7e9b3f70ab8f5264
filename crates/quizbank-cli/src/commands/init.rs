//! The `quizbank init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizbank.toml").exists() {
        println!("quizbank.toml already exists, skipping.");
    } else {
        std::fs::write("quizbank.toml", SAMPLE_CONFIG)?;
        println!("Created quizbank.toml");
    }

    let bank_path = std::path::Path::new("vprasanja.json");
    if bank_path.exists() {
        println!("vprasanja.json already exists, skipping.");
    } else {
        std::fs::write(bank_path, SAMPLE_QUESTIONS)?;
        println!("Created vprasanja.json");
    }

    println!("\nNext steps:");
    println!("  1. Add your own questions to vprasanja.json");
    println!("  2. Run: quizbank facets");
    println!("  3. Run: quizbank list --difficulty 1,2 --sort alphabetical");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizbank configuration

# Question bank: a local file or an http(s) URL
questions = "vprasanja.json"

# Where favorites are persisted between sessions
storage_path = ".quizbank/storage.json"
favorites_key = "favoriteQuestions"

request_timeout_secs = 30
"#;

const SAMPLE_QUESTIONS: &str = r#"[
  {
    "vprašanje": "Koliko je 7 krat 8?",
    "odgovor": "56",
    "težavnost": 1,
    "kategorije": ["matematika"]
  },
  {
    "vprašanje": "Katero je glavno mesto Slovenije?",
    "odgovor": "Ljubljana",
    "težavnost": 1,
    "kategorije": ["geografija"]
  },
  {
    "vprašanje": "Kdo je napisal Zdravljico?",
    "odgovor": "France Prešeren",
    "težavnost": 2,
    "kategorije": ["književnost", "zgodovina"]
  },
  {
    "vprašanje": "Čemu je enaka vsota notranjih kotov trikotnika?",
    "odgovor": "180 stopinj",
    "težavnost": 3,
    "kategorije": ["matematika"]
  }
]
"#;
