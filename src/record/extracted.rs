use serde::Serialize;
use std::fmt;

/// Output column of an [`ExtractedRecord`], in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Region,
    Town,
    MayorName,
    TookOffice,
    Phone,
    Email,
    TownHallAddress,
}

impl RecordField {
    /// Every field, in output order
    pub const ALL: [RecordField; 7] = [
        Self::Region,
        Self::Town,
        Self::MayorName,
        Self::TookOffice,
        Self::Phone,
        Self::Email,
        Self::TownHallAddress,
    ];

    /// Column header written to the output file
    pub fn header(&self) -> &'static str {
        match self {
            Self::Region => "Région",
            Self::Town => "Ville",
            Self::MayorName => "Nom du maire",
            Self::TookOffice => "Date de prise de fonction",
            Self::Phone => "Téléphone",
            Self::Email => "Email",
            Self::TownHallAddress => "Adresse Mairie",
        }
    }

    /// Header row for the output file
    pub fn headers() -> [&'static str; 7] {
        Self::ALL.map(|field| field.header())
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One mayor, ready to be written out
///
/// Fields that could not be found on the page hold an empty string. Struct
/// field order matches [`RecordField::ALL`], which the CSV sink relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedRecord {
    #[serde(rename = "Région")]
    pub region: String,

    #[serde(rename = "Ville")]
    pub town: String,

    #[serde(rename = "Nom du maire")]
    pub mayor_name: String,

    #[serde(rename = "Date de prise de fonction")]
    pub took_office: String,

    #[serde(rename = "Téléphone")]
    pub phone: String,

    #[serde(rename = "Email")]
    pub email: String,

    #[serde(rename = "Adresse Mairie")]
    pub town_hall_address: String,
}

impl ExtractedRecord {
    /// Value of a single field
    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::Region => &self.region,
            RecordField::Town => &self.town,
            RecordField::MayorName => &self.mayor_name,
            RecordField::TookOffice => &self.took_office,
            RecordField::Phone => &self.phone,
            RecordField::Email => &self.email,
            RecordField::TownHallAddress => &self.town_hall_address,
        }
    }

    /// All values, in output order
    pub fn values(&self) -> [&str; 7] {
        RecordField::ALL.map(|field| self.get(field))
    }

    /// `(field, value)` pairs, in output order
    pub fn fields(&self) -> impl Iterator<Item = (RecordField, &str)> + '_ {
        RecordField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}
