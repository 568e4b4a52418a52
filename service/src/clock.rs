use mockall::automock;

#[automock]
pub trait ClockService {
    fn date_now(&self) -> time::Date;
    fn date_time_now(&self) -> time::PrimitiveDateTime;
}
