use super::{Badge, BadgeKind, Dua, RitualPreset};

fn ritual(id: &str, name: &str, name_bn: &str, arabic: &str, meaning: &str, goal: u32) -> RitualPreset {
    RitualPreset {
        id: id.into(),
        name: name.into(),
        name_bn: name_bn.into(),
        arabic: arabic.into(),
        meaning: meaning.into(),
        default_goal: goal,
    }
}

fn badge(
    id: &str,
    name: &str,
    name_bn: &str,
    description: &str,
    requirement: u64,
    kind: BadgeKind,
) -> Badge {
    Badge {
        id: id.into(),
        name: name.into(),
        name_bn: name_bn.into(),
        description: description.into(),
        requirement,
        kind,
    }
}

pub(super) fn rituals() -> Vec<RitualPreset> {
    vec![
        ritual("subhanallah", "SubhanAllah", "সুবহানাল্লাহ", "سُبْحَانَ ٱللَّٰهِ", "Glory be to Allah", 33),
        ritual("alhamdulillah", "Alhamdulillah", "আলহামদুলিল্লাহ", "ٱلْحَمْدُ لِلَّٰهِ", "Praise be to Allah", 33),
        ritual("allahuakbar", "Allahu Akbar", "আল্লাহু আকবার", "ٱللَّٰهُ أَكْبَرُ", "Allah is the Greatest", 33),
        ritual("allah", "Allah", "আল্লাহ", "ٱللَّٰهُ", "Allah", 99),
        ritual(
            "astaghfirullah",
            "Astaghfirullah",
            "আস্তাগফিরুল্লাহ",
            "أَسْتَغْفِرُ ٱللَّٰهَ",
            "I seek forgiveness from Allah",
            100,
        ),
        ritual(
            "lailahaillallah",
            "La ilaha illallah",
            "লা ইলাহা ইল্লাল্লাহ",
            "لَا إِلَٰهَ إِلَّا ٱللَّٰهُ",
            "None worthy of worship but Allah",
            100,
        ),
        ritual(
            "subhanallahi_wabihamdihi",
            "SubhanAllahi wa bihamdihi",
            "সুবহানাল্লাহি ওয়া বিহামদিহি",
            "سُبْحَانَ ٱللَّٰهِ وَبِحَمْدِهِ",
            "Glory be to Allah and His is the praise",
            100,
        ),
        ritual(
            "subhanallahil_azeem",
            "SubhanAllahil Azeem",
            "সুবহানাল্লাহিল আযীম",
            "سُبْحَانَ ٱللَّٰهِ ٱلْعَظِيمِ",
            "Glory be to Allah, the Supreme",
            33,
        ),
        ritual(
            "lahawla",
            "La hawla wala quwwata",
            "লা হাওলা ওয়ালা কুওয়াতা",
            "لَا حَوْلَ وَلَا قُوَّةَ إِلَّا بِٱللَّٰهِ",
            "There is no power except with Allah",
            33,
        ),
        ritual(
            "hasbunallah",
            "HasbunAllahu wa ni'mal wakeel",
            "হাসবুনাল্লাহু ওয়া নি'মাল ওয়াকীল",
            "حَسْبُنَا ٱللَّٰهُ وَنِعْمَ ٱلْوَكِيلُ",
            "Sufficient for us is Allah, and He is the best disposer of affairs",
            33,
        ),
        ritual("bismillah", "Bismillah", "বিসমিল্লাহ", "بِسْمِ ٱللَّٰهِ", "In the name of Allah", 33),
        ritual(
            "salawat",
            "Salawat on Prophet ﷺ",
            "দরূদ শরীফ",
            "ٱللَّٰهُمَّ صَلِّ عَلَىٰ مُحَمَّدٍ وَعَلَىٰ آلِ مُحَمَّدٍ",
            "O Allah, send blessings upon Muhammad and upon the family of Muhammad",
            100,
        ),
        ritual("ya_rabbi", "Ya Rabbi", "ইয়া রব্বী", "يَا رَبِّ", "O my Lord", 33),
        ritual(
            "tasbeeh_complete",
            "Complete Tasbeeh",
            "সম্পূর্ণ তাসবীহ",
            "سُبْحَانَ ٱللَّٰهِ وَٱلْحَمْدُ لِلَّٰهِ وَلَا إِلَٰهَ إِلَّا ٱللَّٰهُ وَٱللَّٰهُ أَكْبَرُ",
            "Glory be to Allah, praise be to Allah, none worthy of worship but Allah, Allah is the Greatest",
            33,
        ),
        ritual(
            "rabbana",
            "Rabbana atina",
            "রাব্বানা আতিনা",
            "رَبَّنَا آتِنَا فِي ٱلدُّنْيَا حَسَنَةً وَفِي ٱلْآخِرَةِ حَسَنَةً وَقِنَا عَذَابَ ٱلنَّارِ",
            "Our Lord, give us good in this world and good in the Hereafter, and protect us from the punishment of the Fire",
            33,
        ),
        ritual(
            "ya_hayyu",
            "Ya Hayyu Ya Qayyum",
            "ইয়া হাইয়্যু ইয়া কাইয়্যূম",
            "يَا حَيُّ يَا قَيُّومُ بِرَحْمَتِكَ أَسْتَغِيثُ",
            "O Ever-Living, O Self-Sustaining, I seek help through Your mercy",
            33,
        ),
    ]
}

pub(super) fn badges() -> Vec<Badge> {
    use BadgeKind::{Counter, Streak};
    vec![
        badge("first_fast", "First Fast", "প্রথম রোজা", "Complete your first fast", 1, Streak),
        badge("week_warrior", "Week Warrior", "সপ্তাহের যোদ্ধা", "7-day fasting streak", 7, Streak),
        badge("halfway", "Halfway Hero", "অর্ধেক পথ", "15-day fasting streak", 15, Streak),
        badge(
            "ramadan_complete",
            "Ramadan Champion",
            "রমজান চ্যাম্পিয়ন",
            "Complete all 30 fasts",
            30,
            Streak,
        ),
        badge("tasbih_100", "Tasbih Starter", "তাসবীহ শুরু", "Complete 100 total dhikr", 100, Counter),
        badge("tasbih_1000", "Dhikr Master", "যিকিরের মাস্টার", "Complete 1000 total dhikr", 1000, Counter),
    ]
}

pub(super) fn suhoor_dua() -> Dua {
    Dua {
        title: "Suhoor Dua (Niyyah)".into(),
        title_bn: "সাহরির দোয়া (নিয়্যত)".into(),
        arabic: "نَوَيْتُ أَنْ أَصُومَ غَدًا مِنْ شَهْرِ رَمَضَانَ الْمُبَارَكِ فَرْضًا لَكَ يَا اللَّهُ فَتَقَبَّلْ مِنِّي إِنَّكَ أَنْتَ السَّمِيعُ الْعَلِيمُ".into(),
        transliteration: "Nawaitu an asuma ghadan min shahri Ramadanil mubaraki fardan laka ya Allahu fataqabbal minni innaka antas-sami'ul-'alim.".into(),
        english: "I intend to fast tomorrow from the blessed month of Ramadan as an obligation to You, O Allah, so accept it from me. Indeed, You are the All-Hearing, the All-Knowing.".into(),
        bengali: "আমি আগামীকাল পবিত্র রমজান মাসের ফরজ রোজা রাখার নিয়ত করছি, হে আল্লাহ, আমার পক্ষ থেকে কবুল করুন। নিশ্চয়ই আপনি সর্বশ্রোতা, সর্বজ্ঞ।".into(),
    }
}

pub(super) fn iftar_dua() -> Dua {
    Dua {
        title: "Iftar Dua".into(),
        title_bn: "ইফতারের দোয়া".into(),
        arabic: "اللَّهُمَّ إِنِّي لَكَ صُمْتُ وَبِكَ آمَنْتُ وَعَلَيْكَ تَوَكَّلْتُ وَعَلَى رِزْقِكَ أَفْطَرْتُ".into(),
        transliteration: "Allahumma inni laka sumtu wa bika aamantu wa alayka tawakkaltu wa ala rizqika aftartu.".into(),
        english: "O Allah, I fasted for You and I believe in You and I put my trust in You and I break my fast with Your sustenance.".into(),
        bengali: "হে আল্লাহ, আমি আপনার জন্য রোজা রেখেছি এবং আপনার প্রতি ঈমান এনেছি এবং আপনার উপর ভরসা করেছি এবং আপনার রিযিক দিয়ে ইফতার করছি।".into(),
    }
}
