//! Supported UI languages and their translation records.
//!
//! Every language maps to one fully populated [`Translations`] value, so a
//! string missing from a language is a compile error rather than a silent
//! fallback at render time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language code: {0}")]
pub struct UnknownLanguage(pub String);

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Hi];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
        }
    }

    pub fn translations(self) -> &'static Translations {
        match self {
            Language::En => &EN,
            Language::Hi => &HI,
        }
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "hi" => Ok(Language::Hi),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

pub struct Translations {
    pub nav: NavText,
    pub overlay: OverlayText,
    pub home: HomeText,
    pub upload: UploadText,
    pub result: ResultText,
    pub community: CommunityText,
    pub explore: ExploreText,
    pub help: HelpText,
    pub login: LoginText,
    pub about: AboutText,
}

pub struct NavText {
    pub title: &'static str,
    pub home: &'static str,
    pub explore: &'static str,
    pub community: &'static str,
    pub about: &'static str,
    pub help: &'static str,
    pub login: &'static str,
    pub language: &'static str,
}

pub struct OverlayText {
    pub heading: &'static str,
    pub prompt: &'static str,
}

pub struct FeatureText {
    pub title: &'static str,
    pub description: &'static str,
}

pub struct HomeText {
    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    pub cta: &'static str,
    pub features_heading: &'static str,
    pub features: [FeatureText; 4],
    pub stat_farmers: &'static str,
    pub stat_accuracy: &'static str,
    pub stat_diseases: &'static str,
}

pub struct UploadText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub drag_drop: &'static str,
    pub take_photo: &'static str,
    pub upload_file: &'static str,
    pub analyzing: &'static str,
    pub analyze: &'static str,
    pub remove_image: &'static str,
    pub supported_formats: &'static str,
    pub too_large_title: &'static str,
    pub too_large_body: &'static str,
    pub not_image_title: &'static str,
    pub not_image_body: &'static str,
    pub nothing_selected: &'static str,
    pub already_analyzing: &'static str,
    pub analysis_failed: &'static str,
}

pub struct ResultText {
    pub disease_detected: &'static str,
    pub confidence: &'static str,
    pub description: &'static str,
    pub prescription: &'static str,
    pub recommended_actions: &'static str,
    pub download_report: &'static str,
    pub share_results: &'static str,
    pub severity_high: &'static str,
    pub severity_medium: &'static str,
    pub severity_low: &'static str,
}

pub struct CommunityText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub share_experience: &'static str,
    pub title_placeholder: &'static str,
    pub author_placeholder: &'static str,
    pub write_post: &'static str,
    pub post_button: &'static str,
    pub recent_posts: &'static str,
    pub likes: &'static str,
    pub comments: &'static str,
    pub solved: &'static str,
    pub urgent: &'static str,
    pub question: &'static str,
    pub tip: &'static str,
    pub comment_placeholder: &'static str,
    pub comment_button: &'static str,
    pub post_incomplete: &'static str,
    pub post_failed: &'static str,
    pub action_failed: &'static str,
    pub unavailable: &'static str,
    pub empty: &'static str,
}

pub struct ExploreText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub common_diseases: &'static str,
    pub symptoms: &'static str,
    pub treatment: &'static str,
    pub prevention: &'static str,
    pub search_placeholder: &'static str,
    pub search_button: &'static str,
    pub no_matches: &'static str,
    pub ask_ai: &'static str,
    pub ask_placeholder: &'static str,
    pub ask_button: &'static str,
    pub thinking: &'static str,
    pub ai_response: &'static str,
    pub chat_fallback: &'static str,
}

pub struct HelpText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub quick_help: &'static str,
    pub get_help: &'static str,
    pub faq: &'static str,
    pub contact_support: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub subject: &'static str,
    pub message: &'static str,
    pub send_message: &'static str,
    pub response_time: &'static str,
    pub unavailable: &'static str,
    pub contact_sent: &'static str,
    pub contact_incomplete: &'static str,
    pub contact_failed: &'static str,
}

pub struct LoginText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub phone_login: &'static str,
    pub email_login: &'static str,
    pub name: &'static str,
    pub name_placeholder: &'static str,
    pub phone_number: &'static str,
    pub phone_placeholder: &'static str,
    pub email: &'static str,
    pub email_placeholder: &'static str,
    pub password: &'static str,
    pub password_placeholder: &'static str,
    pub otp_placeholder: &'static str,
    pub send_otp: &'static str,
    pub verify_otp: &'static str,
    pub sign_up: &'static str,
    pub recommended: &'static str,
    pub fields_required: &'static str,
    pub otp_send_failed: &'static str,
    pub otp_verified: &'static str,
    pub otp_verify_failed: &'static str,
    pub signup_succeeded: &'static str,
    pub phone_signup_succeeded: &'static str,
    pub signup_failed: &'static str,
    pub request_error: &'static str,
}

pub struct AboutText {
    pub title: &'static str,
    pub mission: &'static str,
    pub mission_text: &'static str,
    pub team: &'static str,
    pub achievements: &'static str,
    pub farmers: &'static str,
    pub diseases: &'static str,
    pub accuracy: &'static str,
    pub contact: &'static str,
    pub business_email: &'static str,
    pub business_contact: &'static str,
    pub address: &'static str,
}

pub static EN: Translations = Translations {
    nav: NavText {
        title: "CropCare AI",
        home: "Home",
        explore: "Explore",
        community: "Community",
        about: "About",
        help: "Help",
        login: "Login",
        language: "Language",
    },
    overlay: OverlayText {
        heading: "Choose Your Language / भाषा चुनें",
        prompt: "Select your preferred language to continue",
    },
    home: HomeText {
        hero_title: "Protect Your Crops with AI-Powered Disease Detection",
        hero_subtitle: "Upload a photo of your crop leaf and get instant AI analysis with treatment recommendations",
        cta: "Start Analysis",
        features_heading: "Key Features",
        features: [
            FeatureText {
                title: "Instant Detection",
                description: "Get disease identification in seconds using advanced AI technology",
            },
            FeatureText {
                title: "Expert Recommendations",
                description: "Receive treatment plans and preventive measures from agricultural experts",
            },
            FeatureText {
                title: "Community Support",
                description: "Connect with farmers worldwide and share experiences",
            },
            FeatureText {
                title: "94% Accuracy",
                description: "Trusted by over 50,000 farmers with proven results",
            },
        ],
        stat_farmers: "50,000+ Farmers Helped",
        stat_accuracy: "94% Detection Accuracy",
        stat_diseases: "200+ Diseases Detected",
    },
    upload: UploadText {
        title: "Upload Crop Leaf Image",
        subtitle: "Take a clear photo of the affected leaf for AI analysis",
        drag_drop: "Drag and drop your image here, or click to browse",
        take_photo: "Take Photo",
        upload_file: "Upload File",
        analyzing: "Analyzing your crop...",
        analyze: "Analyze Crop Disease",
        remove_image: "Remove image",
        supported_formats: "Supported formats: JPG, PNG, WEBP (Max 10MB)",
        too_large_title: "File too large",
        too_large_body: "Please select an image smaller than 10MB",
        not_image_title: "Invalid file type",
        not_image_body: "Please select an image file",
        nothing_selected: "Please select an image first",
        already_analyzing: "Analysis is already running for this image",
        analysis_failed: "Analysis failed. Please try again.",
    },
    result: ResultText {
        disease_detected: "Disease Detected",
        confidence: "Confidence",
        description: "Description",
        prescription: "Prescription",
        recommended_actions: "Recommended Actions",
        download_report: "Download Report",
        share_results: "Share Results",
        severity_high: "High Priority",
        severity_medium: "Medium Priority",
        severity_low: "Low Priority",
    },
    community: CommunityText {
        title: "Farmer Community",
        subtitle: "Connect with fellow farmers, share experiences, and get help",
        share_experience: "Share Your Experience",
        title_placeholder: "Title",
        author_placeholder: "Your name",
        write_post: "Write your post...",
        post_button: "Post",
        recent_posts: "Recent Posts",
        likes: "likes",
        comments: "comments",
        solved: "Solved",
        urgent: "Urgent",
        question: "Question",
        tip: "Tip",
        comment_placeholder: "Write a comment...",
        comment_button: "Comment",
        post_incomplete: "Please fill in the title, your name and the post",
        post_failed: "Could not publish your post",
        action_failed: "Something went wrong. Please try again.",
        unavailable: "Community posts are currently unavailable.",
        empty: "No posts yet. Be the first to share!",
    },
    explore: ExploreText {
        title: "Explore Crop Diseases",
        subtitle: "Ask AI and learn about various crop diseases and their treatments",
        common_diseases: "Common Crop Diseases",
        symptoms: "Symptoms",
        treatment: "Treatment",
        prevention: "Prevention",
        search_placeholder: "Search by disease, crop or symptom...",
        search_button: "Search",
        no_matches: "No diseases match your search.",
        ask_ai: "Ask CropCare AI",
        ask_placeholder: "Ask about any crop disease, symptoms, or treatments...",
        ask_button: "Ask AI",
        thinking: "Thinking...",
        ai_response: "AI Response:",
        chat_fallback: "AI assistant is currently unavailable.",
    },
    help: HelpText {
        title: "Help & Support",
        subtitle: "Get help with using CropCare AI platform",
        quick_help: "Quick Help",
        get_help: "Get Help",
        faq: "Frequently Asked Questions",
        contact_support: "Contact Support",
        name: "Name",
        email: "Email",
        subject: "Subject",
        message: "Message",
        send_message: "Send Message",
        response_time: "We typically respond within 24 hours",
        unavailable: "This section is currently unavailable.",
        contact_sent: "Your message has been sent. We will get back to you soon.",
        contact_incomplete: "Please fill in all fields before sending",
        contact_failed: "Could not send your message. Please try again later.",
    },
    login: LoginText {
        title: "Welcome Back",
        subtitle: "Sign in to your CropCare AI account",
        phone_login: "Phone Login",
        email_login: "Email Login",
        name: "Name",
        name_placeholder: "Enter your name",
        phone_number: "Phone Number",
        phone_placeholder: "Enter your phone number",
        email: "Email Address",
        email_placeholder: "Enter your email",
        password: "Password",
        password_placeholder: "Enter your password",
        otp_placeholder: "Enter OTP",
        send_otp: "Send OTP",
        verify_otp: "Verify OTP",
        sign_up: "Sign Up",
        recommended: "Recommended for farmers",
        fields_required: "Please fill in all required fields",
        otp_send_failed: "Failed to send OTP",
        otp_verified: "OTP verified successfully!",
        otp_verify_failed: "OTP verification failed",
        signup_succeeded: "Signed up successfully!",
        phone_signup_succeeded: "Phone signup successful!",
        signup_failed: "Signup failed",
        request_error: "Could not reach the server. Please try again.",
    },
    about: AboutText {
        title: "About CropCare AI",
        mission: "Our Mission",
        mission_text: "To empower farmers worldwide with AI-driven crop disease detection technology, helping them protect their crops and increase agricultural productivity.",
        team: "Our Team",
        achievements: "Our Achievements",
        farmers: "Farmers Helped",
        diseases: "Diseases Detected",
        accuracy: "Detection Accuracy",
        contact: "Contact Information",
        business_email: "Business Email",
        business_contact: "Business Contact",
        address: "Address",
    },
};

pub static HI: Translations = Translations {
    nav: NavText {
        title: "क्रॉपकेयर AI",
        home: "होम",
        explore: "खोजें",
        community: "समुदाय",
        about: "हमारे बारे में",
        help: "सहायता",
        login: "लॉग इन",
        language: "भाषा",
    },
    overlay: OverlayText {
        heading: "Choose Your Language / भाषा चुनें",
        prompt: "जारी रखने के लिए अपनी पसंदीदा भाषा चुनें",
    },
    home: HomeText {
        hero_title: "AI-संचालित रोग पहचान के साथ अपनी फसलों की सुरक्षा करें",
        hero_subtitle: "अपनी फसल की पत्ती की तस्वीर अपलोड करें और उपचार सुझावों के साथ तुरंत AI विश्लेषण पाएं",
        cta: "विश्लेषण शुरू करें",
        features_heading: "मुख्य विशेषताएं",
        features: [
            FeatureText {
                title: "तुरंत पहचान",
                description: "उन्नत AI तकनीक का उपयोग करके सेकंडों में रोग की पहचान पाएं",
            },
            FeatureText {
                title: "विशेषज्ञ सुझाव",
                description: "कृषि विशेषज्ञों से उपचार योजना और बचाव के उपाय प्राप्त करें",
            },
            FeatureText {
                title: "समुदायिक सहायता",
                description: "दुनियाभर के किसानों से जुड़ें और अनुभव साझा करें",
            },
            FeatureText {
                title: "94% सटीकता",
                description: "50,000 से अधिक किसानों का भरोसा",
            },
        ],
        stat_farmers: "50,000+ किसानों की मदद",
        stat_accuracy: "94% पहचान सटीकता",
        stat_diseases: "200+ रोगों की पहचान",
    },
    upload: UploadText {
        title: "फसल की पत्ती की तस्वीर अपलोड करें",
        subtitle: "AI विश्लेषण के लिए प्रभावित पत्ती की स्पष्ट तस्वीर लें",
        drag_drop: "अपनी तस्वीर यहाँ खींचें और छोड़ें, या ब्राउज़ करने के लिए क्लिक करें",
        take_photo: "फोटो लें",
        upload_file: "फाइल अपलोड करें",
        analyzing: "आपकी फसल का विश्लेषण कर रहे हैं...",
        analyze: "फसल रोग का विश्लेषण करें",
        remove_image: "तस्वीर हटाएं",
        supported_formats: "समर्थित प्रारूप: JPG, PNG, WEBP (अधिकतम 10MB)",
        too_large_title: "फाइल बहुत बड़ी है",
        too_large_body: "कृपया 10MB से छोटी तस्वीर चुनें",
        not_image_title: "अमान्य फाइल प्रकार",
        not_image_body: "कृपया एक तस्वीर फाइल चुनें",
        nothing_selected: "कृपया पहले एक तस्वीर चुनें",
        already_analyzing: "इस तस्वीर का विश्लेषण पहले से चल रहा है",
        analysis_failed: "विश्लेषण विफल रहा। कृपया पुनः प्रयास करें।",
    },
    result: ResultText {
        disease_detected: "रोग का पता चला",
        confidence: "विश्वसनीयता",
        description: "विवरण",
        prescription: "दवा",
        recommended_actions: "सुझावित कार्य",
        download_report: "रिपोर्ट डाउनलोड करें",
        share_results: "परिणाम साझा करें",
        severity_high: "उच्च प्राथमिकता",
        severity_medium: "मध्यम प्राथमिकता",
        severity_low: "कम प्राथमिकता",
    },
    community: CommunityText {
        title: "किसान समुदाय",
        subtitle: "साथी किसानों से जुड़ें, अनुभव साझा करें और सहायता पाएं",
        share_experience: "अपना अनुभव साझा करें",
        title_placeholder: "शीर्षक",
        author_placeholder: "आपका नाम",
        write_post: "अपनी पोस्ट लिखें...",
        post_button: "पोस्ट करें",
        recent_posts: "हाल की पोस्ट",
        likes: "पसंद",
        comments: "टिप्पणियां",
        solved: "हल हो गया",
        urgent: "जरूरी",
        question: "प्रश्न",
        tip: "सुझाव",
        comment_placeholder: "टिप्पणी लिखें...",
        comment_button: "टिप्पणी करें",
        post_incomplete: "कृपया शीर्षक, अपना नाम और पोस्ट भरें",
        post_failed: "आपकी पोस्ट प्रकाशित नहीं हो सकी",
        action_failed: "कुछ गलत हो गया। कृपया पुनः प्रयास करें।",
        unavailable: "समुदाय पोस्ट अभी उपलब्ध नहीं हैं।",
        empty: "अभी कोई पोस्ट नहीं है। पहली पोस्ट साझा करें!",
    },
    explore: ExploreText {
        title: "फसल रोगों की खोज करें",
        subtitle: "एआई से पूछें और विभिन्न फसल रोगों और उनके उपचार के बारे में जानें",
        common_diseases: "सामान्य फसल रोग",
        symptoms: "लक्षण",
        treatment: "उपचार",
        prevention: "रोकथाम",
        search_placeholder: "रोग, फसल या लक्षण से खोजें...",
        search_button: "खोजें",
        no_matches: "आपकी खोज से कोई रोग मेल नहीं खाता।",
        ask_ai: "क्रॉपकेयर एआई से पूछें",
        ask_placeholder: "किसी भी फसल रोग, लक्षण या उपचार के बारे में पूछें...",
        ask_button: "एआई से पूछें",
        thinking: "सोच रहे हैं...",
        ai_response: "एआई का उत्तर:",
        chat_fallback: "एआई सहायक अभी उपलब्ध नहीं है।",
    },
    help: HelpText {
        title: "सहायता और समर्थन",
        subtitle: "क्रॉपकेयर AI प्लेटफॉर्म का उपयोग करने में सहायता पाएं",
        quick_help: "त्वरित सहायता",
        get_help: "सहायता पाएं",
        faq: "अक्सर पूछे जाने वाले प्रश्न",
        contact_support: "समर्थन से संपर्क करें",
        name: "नाम",
        email: "ईमेल",
        subject: "विषय",
        message: "संदेश",
        send_message: "संदेश भेजें",
        response_time: "हम आमतौर पर 24 घंटे के भीतर जवाब देते हैं",
        unavailable: "यह अनुभाग अभी उपलब्ध नहीं है।",
        contact_sent: "आपका संदेश भेज दिया गया है। हम जल्द ही आपसे संपर्क करेंगे।",
        contact_incomplete: "भेजने से पहले कृपया सभी फ़ील्ड भरें",
        contact_failed: "आपका संदेश नहीं भेजा जा सका। कृपया बाद में पुनः प्रयास करें।",
    },
    login: LoginText {
        title: "वापस स्वागत है",
        subtitle: "अपने क्रॉपकेयर AI खाते में साइन इन करें",
        phone_login: "फोन लॉगिन",
        email_login: "ईमेल लॉगिन",
        name: "नाम",
        name_placeholder: "अपना नाम दर्ज करें",
        phone_number: "फोन नंबर",
        phone_placeholder: "अपना फोन नंबर दर्ज करें",
        email: "ईमेल पता",
        email_placeholder: "अपना ईमेल दर्ज करें",
        password: "पासवर्ड",
        password_placeholder: "अपना पासवर्ड दर्ज करें",
        otp_placeholder: "OTP दर्ज करें",
        send_otp: "OTP भेजें",
        verify_otp: "OTP सत्यापित करें",
        sign_up: "साइन अप",
        recommended: "किसानों के लिए अनुशंसित",
        fields_required: "कृपया सभी आवश्यक फ़ील्ड भरें",
        otp_send_failed: "OTP भेजने में विफल",
        otp_verified: "OTP सफलतापूर्वक सत्यापित!",
        otp_verify_failed: "OTP सत्यापन विफल",
        signup_succeeded: "सफलतापूर्वक साइन अप हो गया!",
        phone_signup_succeeded: "फोन साइन अप सफल!",
        signup_failed: "साइन अप विफल",
        request_error: "सर्वर से संपर्क नहीं हो सका। कृपया पुनः प्रयास करें।",
    },
    about: AboutText {
        title: "क्रॉपकेयर AI के बारे में",
        mission: "हमारा मिशन",
        mission_text: "AI-संचालित फसल रोग पहचान तकनीक के साथ दुनियाभर के किसानों को सशक्त बनाना, उनकी फसलों की सुरक्षा में मदद करना और कृषि उत्पादकता बढ़ाना।",
        team: "हमारी टीम",
        achievements: "हमारी उपलब्धियां",
        farmers: "किसानों की मदद की",
        diseases: "रोग का पता लगाया",
        accuracy: "पहचान की सटीकता",
        contact: "संपर्क जानकारी",
        business_email: "व्यावसायिक ईमेल",
        business_contact: "व्यावसायिक संपर्क",
        address: "पता",
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_codes() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!("hi".parse::<Language>().unwrap(), Language::Hi);
        assert_eq!(" HI ".parse::<Language>().unwrap(), Language::Hi);
    }

    #[test]
    fn rejects_unwired_codes() {
        assert!("bn".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn code_round_trips_for_every_language() {
        for language in Language::ALL {
            assert_eq!(language.code().parse::<Language>().unwrap(), language);
        }
    }

    #[test]
    fn default_is_english() {
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn each_language_has_its_own_record() {
        assert_eq!(Language::En.translations().nav.home, "Home");
        assert_eq!(Language::Hi.translations().nav.home, "होम");
    }
}
