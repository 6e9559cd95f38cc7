use serde::{Serialize, Serializer};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// The 47 prefectures, numbered the way the leading two digits of a locality code number them.
#[derive(
    Debug, Hash, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter,
)]
#[allow(missing_docs)]
pub enum Prefecture {
    #[strum(to_string = "北海道")]
    Hokkaido = 1,
    #[strum(to_string = "青森県")]
    Aomori,
    #[strum(to_string = "岩手県")]
    Iwate,
    #[strum(to_string = "宮城県")]
    Miyagi,
    #[strum(to_string = "秋田県")]
    Akita,
    #[strum(to_string = "山形県")]
    Yamagata,
    #[strum(to_string = "福島県")]
    Fukushima,
    #[strum(to_string = "茨城県")]
    Ibaraki,
    #[strum(to_string = "栃木県")]
    Tochigi,
    #[strum(to_string = "群馬県")]
    Gunma,
    #[strum(to_string = "埼玉県")]
    Saitama,
    #[strum(to_string = "千葉県")]
    Chiba,
    #[strum(to_string = "東京都")]
    Tokyo,
    #[strum(to_string = "神奈川県")]
    Kanagawa,
    #[strum(to_string = "新潟県")]
    Niigata,
    #[strum(to_string = "富山県")]
    Toyama,
    #[strum(to_string = "石川県")]
    Ishikawa,
    #[strum(to_string = "福井県")]
    Fukui,
    #[strum(to_string = "山梨県")]
    Yamanashi,
    #[strum(to_string = "長野県")]
    Nagano,
    #[strum(to_string = "岐阜県")]
    Gifu,
    #[strum(to_string = "静岡県")]
    Shizuoka,
    #[strum(to_string = "愛知県")]
    Aichi,
    #[strum(to_string = "三重県")]
    Mie,
    #[strum(to_string = "滋賀県")]
    Shiga,
    #[strum(to_string = "京都府")]
    Kyoto,
    #[strum(to_string = "大阪府")]
    Osaka,
    #[strum(to_string = "兵庫県")]
    Hyogo,
    #[strum(to_string = "奈良県")]
    Nara,
    #[strum(to_string = "和歌山県")]
    Wakayama,
    #[strum(to_string = "鳥取県")]
    Tottori,
    #[strum(to_string = "島根県")]
    Shimane,
    #[strum(to_string = "岡山県")]
    Okayama,
    #[strum(to_string = "広島県")]
    Hiroshima,
    #[strum(to_string = "山口県")]
    Yamaguchi,
    #[strum(to_string = "徳島県")]
    Tokushima,
    #[strum(to_string = "香川県")]
    Kagawa,
    #[strum(to_string = "愛媛県")]
    Ehime,
    #[strum(to_string = "高知県")]
    Kochi,
    #[strum(to_string = "福岡県")]
    Fukuoka,
    #[strum(to_string = "佐賀県")]
    Saga,
    #[strum(to_string = "長崎県")]
    Nagasaki,
    #[strum(to_string = "熊本県")]
    Kumamoto,
    #[strum(to_string = "大分県")]
    Oita,
    #[strum(to_string = "宮崎県")]
    Miyazaki,
    #[strum(to_string = "鹿児島県")]
    Kagoshima,
    #[strum(to_string = "沖縄県")]
    Okinawa,
}

impl Prefecture {
    /// Get the name as it appears in the station lists.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }

    /// The two digit prefecture number.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a prefecture by its number.
    pub fn from_code(code: u8) -> Option<Self> {
        Prefecture::iter().find(|pref| pref.code() == code)
    }

    /// Decode the prefecture from the leading two digits of a locality code.
    pub fn from_locality_code(locality_code: &str) -> Option<Self> {
        locality_code
            .trim()
            .get(..2)
            .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u8>().ok())
            .and_then(Prefecture::from_code)
    }
}

impl Serialize for Prefecture {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_static_str())
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
