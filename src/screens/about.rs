//! Static content for the about page.

use crate::i18n::Translations;

pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
    pub specialty: &'static str,
    pub experience: &'static str,
}

pub const TEAM: &[TeamMember] = &[
    TeamMember {
        name: "Dr. Rajesh Kumar",
        role: "Founder & CEO",
        specialty: "Agricultural Technology",
        experience: "15+ years in AgriTech",
    },
    TeamMember {
        name: "Priya Sharma",
        role: "Chief Technology Officer",
        specialty: "AI/ML Engineering",
        experience: "12+ years in AI",
    },
    TeamMember {
        name: "Arjun Patel",
        role: "Head of Agriculture",
        specialty: "Crop Science",
        experience: "20+ years in Agriculture",
    },
];

pub const BUSINESS_EMAIL: &str = "contact@cropcare-ai.com";
pub const BUSINESS_PHONE: &str = "+91 98765 43210";
pub const ADDRESS_LINES: [&str; 3] = [
    "AgriTech Hub, Sector 18",
    "Gurugram, Haryana 122015",
    "India",
];

pub struct Achievement {
    pub number: &'static str,
    pub label: &'static str,
}

pub fn achievements(t: &Translations) -> [Achievement; 3] {
    [
        Achievement {
            number: "50,000+",
            label: t.about.farmers,
        },
        Achievement {
            number: "200+",
            label: t.about.diseases,
        },
        Achievement {
            number: "94%",
            label: t.about.accuracy,
        },
    ]
}
