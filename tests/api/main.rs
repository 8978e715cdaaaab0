mod health_check;
mod helpers;
mod remind;
mod savings;
