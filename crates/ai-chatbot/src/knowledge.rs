//! Built-in knowledge presets.

use std::fmt::{self, Display};
use std::str::FromStr;

use ai_chatbot_core::KnowledgeBase;

/// A built-in knowledge base together with the system prompt written for
/// it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Everyday topics: programming, AI, health, environment, education
    /// and technology.
    #[default]
    General,
    /// Introductory knowledge about Islam.
    Islamic,
}

impl Preset {
    /// Returns the preset name used in configuration.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Preset::General => "general",
            Preset::Islamic => "islamic",
        }
    }

    /// Returns the system prompt for this preset.
    #[inline]
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Preset::General => include_str!("./prompts/general.md"),
            Preset::Islamic => include_str!("./prompts/islamic.md"),
        }
    }

    /// Builds the knowledge base for this preset.
    pub fn knowledge(&self) -> KnowledgeBase {
        match self {
            Preset::General => general_knowledge(),
            Preset::Islamic => islamic_knowledge(),
        }
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Preset::General),
            "islamic" => Ok(Preset::Islamic),
            other => Err(format!(
                "unknown knowledge preset `{other}`, expected `general` or `islamic`"
            )),
        }
    }
}

fn general_knowledge() -> KnowledgeBase {
    KnowledgeBase::new()
        .with_topic(
            "programming",
            "Programming Basics:
- Programming is writing instructions for computers
- Common languages: Python, JavaScript, Java, C++
- Key concepts: variables, loops, functions, classes
- Problem-solving and logical thinking are essential
- Practice regularly to improve skills",
            ["programming", "code", "coding", "developer", "python", "javascript"],
        )
        .with_topic(
            "ai_ml",
            "Artificial Intelligence and Machine Learning:
- AI: machines performing tasks that typically require human intelligence
- Machine learning: AI systems that learn from data
- Applications: chatbots, image recognition, recommendations
- Requires large amounts of quality data for training
- Ethics and responsible use are important considerations",
            [
                "ai",
                "artificial intelligence",
                "machine learning",
                "ml",
                "chatbot",
                "neural",
            ],
        )
        .with_topic(
            "health",
            "Health and Wellness:
- Balanced diet with fruits, vegetables, and lean proteins
- Regular exercise: 150 minutes of moderate activity weekly
- Adequate sleep: 7-9 hours per night for adults
- Mental health is as important as physical health
- Regular check-ups and preventive care save lives",
            ["health", "wellness", "exercise", "diet", "sleep", "medical"],
        )
        .with_topic(
            "environment",
            "Environmental Protection:
- Climate change is driven by human activities
- Reduce your carbon footprint through sustainable choices
- Conservation: reduce, reuse, recycle
- Renewable energy sources: solar, wind, hydro
- Protect biodiversity and natural habitats",
            [
                "environment",
                "climate",
                "sustainability",
                "green",
                "eco",
                "nature",
            ],
        )
        .with_topic(
            "education",
            "Education and Learning:
- Lifelong learning keeps the mind active
- Different learning styles: visual, auditory, kinesthetic
- Setting goals and maintaining discipline helps success
- Technology enhances but doesn't replace traditional learning
- Critical thinking and problem-solving are key skills",
            ["education", "learning", "study", "school", "knowledge", "teach"],
        )
        .with_topic(
            "technology",
            "Technology Trends:
- Cloud computing enables scalable applications
- The Internet of Things connects everyday devices
- Cybersecurity protects digital information
- Blockchain provides secure, transparent transactions
- Quantum computing may revolutionize computing power",
            ["technology", "tech", "computer", "software", "hardware", "digital"],
        )
}

fn islamic_knowledge() -> KnowledgeBase {
    KnowledgeBase::new()
        .with_topic(
            "five_pillars",
            "The Five Pillars of Islam:
- Shahada: the declaration that there is no god but Allah and Muhammad is His messenger
- Salah: the five daily prayers
- Zakat: obligatory charity on qualifying wealth
- Sawm: fasting from dawn to sunset during Ramadan
- Hajj: the pilgrimage to Mecca, once in a lifetime for those able",
            ["pillars", "pillar", "shahada", "arkan"],
        )
        .with_topic(
            "prayer",
            "Prayer (Salah):
- Five daily prayers: Fajr, Dhuhr, Asr, Maghrib and Isha
- Performed facing the Qibla, the direction of the Kaaba in Mecca
- Ritual purity through wudu (ablution) is required beforehand
- Friday congregational prayer (Jumu'ah) replaces Dhuhr for men
- Prayer times follow the position of the sun",
            ["prayer", "pray", "salah", "salat", "namaz", "wudu", "qibla"],
        )
        .with_topic(
            "ramadan",
            "Ramadan and Fasting (Sawm):
- Ramadan is the ninth month of the Islamic lunar calendar
- Adults who are able fast from dawn (Fajr) until sunset (Maghrib)
- The pre-dawn meal is suhoor, the fast is broken at iftar
- The sick, travellers, and pregnant or nursing women may be exempt
- The month ends with the celebration of Eid al-Fitr",
            ["ramadan", "fasting", "fast", "sawm", "iftar", "suhoor", "eid"],
        )
        .with_topic(
            "quran",
            "The Qur'an:
- The holy book of Islam, revealed to the Prophet Muhammad over about 23 years
- Contains 114 chapters (surahs) made up of verses (ayahs)
- Revealed in Arabic and recited in Arabic during prayer
- The first word revealed was \"Iqra\" (Read)
- Memorising the whole Qur'an is a respected tradition (hafiz)",
            ["quran", "qur'an", "koran", "surah", "ayah", "revelation"],
        )
        .with_topic(
            "hajj",
            "Hajj (Pilgrimage):
- Obligatory once in a lifetime for Muslims who are physically and financially able
- Takes place in Dhul Hijjah, the twelfth month of the Islamic calendar
- Rites include tawaf around the Kaaba and standing at Arafat
- Umrah is a shorter pilgrimage that can be made any time of year
- Hajj ends with Eid al-Adha",
            ["hajj", "pilgrimage", "mecca", "makkah", "kaaba", "umrah"],
        )
        .with_topic(
            "zakat",
            "Zakat (Obligatory Charity):
- Due on wealth held for a full lunar year above the nisab threshold
- The common rate is 2.5% of qualifying savings
- Given to eligible recipients such as the poor and those in debt
- Purifies wealth and supports the community
- Voluntary charity beyond zakat is called sadaqah",
            ["zakat", "charity", "alms", "sadaqah", "nisab"],
        )
        .with_topic(
            "prophet",
            "The Prophet Muhammad:
- Born in Mecca around 570 CE
- Received the first revelation at about age 40 in the cave of Hira
- Migrated to Medina in 622 CE (the Hijrah), the start of the Islamic calendar
- His sayings and practice (sunnah) are recorded in hadith collections
- Regarded as the final prophet in Islam",
            ["prophet", "muhammad", "sunnah", "hadith", "seerah"],
        )
        .with_fallback("General Islamic knowledge and teachings.")
}
