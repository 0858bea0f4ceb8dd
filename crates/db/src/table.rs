use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Enquiry {
    Table,
    Id,
    Name,
    Email,
    Phone,
    State,
    Pincode,
    Message,
    Status,
    CreatedAt,
    ForwardedAt,
}
