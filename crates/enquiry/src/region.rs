use strum::{AsRefStr, Display, EnumString, VariantArray};

/// States and union territories offered by the contact form, in display order.
#[derive(EnumString, Display, VariantArray, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    #[strum(serialize = "Andhra Pradesh")]
    AndhraPradesh,
    #[strum(serialize = "Arunachal Pradesh")]
    ArunachalPradesh,
    Assam,
    Bihar,
    Chhattisgarh,
    Goa,
    Gujarat,
    Haryana,
    #[strum(serialize = "Himachal Pradesh")]
    HimachalPradesh,
    Jharkhand,
    Karnataka,
    Kerala,
    #[strum(serialize = "Madhya Pradesh")]
    MadhyaPradesh,
    Maharashtra,
    Manipur,
    Meghalaya,
    Mizoram,
    Nagaland,
    Odisha,
    Punjab,
    Rajasthan,
    Sikkim,
    #[strum(serialize = "Tamil Nadu")]
    TamilNadu,
    Telangana,
    Tripura,
    #[strum(serialize = "Uttar Pradesh")]
    UttarPradesh,
    Uttarakhand,
    #[strum(serialize = "West Bengal")]
    WestBengal,
    #[strum(serialize = "Andaman and Nicobar Islands")]
    AndamanAndNicobarIslands,
    Chandigarh,
    #[strum(serialize = "Dadra and Nagar Haveli")]
    DadraAndNagarHaveli,
    #[strum(serialize = "Daman and Diu")]
    DamanAndDiu,
    Lakshadweep,
    Delhi,
    Puducherry,
}
