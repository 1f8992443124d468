use crate::catalog::TopicEntry;

const BUILTIN_TOPICS: &[(&str, &str)] = &[
    ("Iman & Taqwa", "Increase in iman (faith) and taqwa (piety)."),
    ("Guidance", "Guidance in difficult decisions and daily life."),
    ("Steadfast Worship", "Steadfastness in prayers, fasting, and worship."),
    ("Love of Allah", "Love for Allah, His Messenger ﷺ, and the Qur'an."),
    ("Forgiveness", "Forgiveness and protection from sins."),
    ("Health", "Physical health and recovery from illness."),
    ("Mental Peace", "Mental peace, patience, and relief from anxiety."),
    ("Stress Relief", "Protection from stress, depression, and harmful habits."),
    ("Strength in Worship", "Strength to perform acts of worship despite difficulties."),
    ("Righteous Children", "Righteousness and success for children and future generations."),
    ("Marriage", "Happy, loving, and respectful marriages."),
    ("Parents & Elders", "Protection and care for parents and elders."),
    ("Family Unity", "Family unity, kindness, and mutual understanding."),
    ("Friendships", "Blessings in friendships and community ties."),
    ("Halal Rizq", "Halal and sufficient rizq (sustenance)."),
    ("Studies & Work", "Success in studies, work, or business."),
    ("Debt Relief", "Protection from debt and financial hardship."),
    ("Growth", "Opportunities for growth, prosperity, and helping others."),
    ("Safety", "Safety from accidents, calamities, and harm."),
    ("Protection from Evil", "Protection from evil, envy, black magic, and oppression."),
    ("Travel & Home", "Security in travel, home, and public life."),
    ("Overcoming Trials", "Strength to overcome trials and challenges."),
    ("Patience", "Patience (sabr) and gratitude (shukr) in all circumstances."),
    ("Good Character", "Humility, honesty, and good character."),
    ("Avoiding Arrogance", "Avoiding arrogance, jealousy, and harmful behavior."),
    ("Excellence", "Excellence in worship and contribution to society."),
    ("Exams & Legal", "Ease in exams, work challenges, or legal matters."),
    ("Healing from Grief", "Healing after loss or grief."),
    ("Marriage Decisions", "Guidance in marriage or family decisions."),
    ("Loneliness", "Comfort for those struggling with loneliness or hardship."),
];

pub fn builtin_topics() -> Vec<TopicEntry> {
    BUILTIN_TOPICS
        .iter()
        .map(|(label, text)| TopicEntry::new(*label, *text))
        .collect()
}
