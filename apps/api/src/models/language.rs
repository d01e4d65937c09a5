//! UI language and the label strings the renderer and the support prompt print.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    TH,
    EN,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::TH => Language::EN,
            Language::EN => Language::TH,
        }
    }
}

/// Localized strings. Only what leaves the service is listed here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Labels {
    pub experience: &'static str,
    pub education: &'static str,
    pub skills: &'static str,
    pub projects: &'static str,
    pub about: &'static str,
    pub contact: &'static str,
    pub payment_required: &'static str,
    pub payment_desc: &'static str,
    pub price: &'static str,
    pub scan_to_pay: &'static str,
    pub confirm_payment: &'static str,
    pub checking_payment: &'static str,
    pub upload_slip: &'static str,
    pub slip_hint: &'static str,
}

static EN: Labels = Labels {
    experience: "Experience",
    education: "Education",
    skills: "Skills",
    projects: "Projects",
    about: "About Me",
    contact: "Contact",
    payment_required: "Support Developer ☕",
    payment_desc: "This tool is free forever. If you like it, you can support the developer (Optional).",
    price: "~2.00 THB",
    scan_to_pay: "Scan to Support",
    confirm_payment: "Download Now",
    checking_payment: "Processing...",
    upload_slip: "Attach Slip (Optional)",
    slip_hint: "You can download directly without donating if you prefer.",
};

static TH: Labels = Labels {
    experience: "ประสบการณ์ทำงาน",
    education: "การศึกษา",
    skills: "ทักษะ",
    projects: "โปรเจกต์",
    about: "เกี่ยวกับฉัน",
    contact: "ช่องทางติดต่อ",
    payment_required: "สนับสนุนนักพัฒนา ☕",
    payment_desc: "แอปนี้เปิดให้ใช้งานฟรี หากถูกใจสามารถสนับสนุนค่ากาแฟหรือค่าเซิร์ฟเวอร์ได้ตามศรัทธาครับ (ไม่บังคับ)",
    price: "2.00 บาท (หรือตามศรัทธา)",
    scan_to_pay: "สแกนเพื่อสนับสนุน",
    confirm_payment: "ดำเนินการต่อ / ดาวน์โหลด",
    checking_payment: "กำลังตรวจสอบ...",
    upload_slip: "แนบสลิป (ไม่บังคับ)",
    slip_hint: "หากไม่สะดวกโอนเงิน สามารถกดปุ่มดาวน์โหลดเพื่อใช้งานได้ทันที",
};

pub fn labels(lang: Language) -> &'static Labels {
    match lang {
        Language::EN => &EN,
        Language::TH => &TH,
    }
}
